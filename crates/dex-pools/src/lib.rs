//! dex-pools: Pool models, swap math, and per-DEX adapters
//!
//! Every supported DEX gets a pool struct with its own exact-integer pricing
//! formula, unified behind the [`Pool`] sum type, plus an adapter that loads
//! live pool state from the publisher's on-chain resources.

pub mod adapters;
pub mod directional;
pub mod math;
pub mod piecewise;
pub mod pool;
pub mod provider;
pub mod rebate;

pub use adapters::{
    AnimeProvider, AptoswapProvider, AuxProvider, BasiqProvider, ObricProvider, PancakeProvider,
    PontemProvider,
};
pub use directional::{AptoswapPool, FeeDirection, DEFAULT_BPS_SCALE};
pub use piecewise::{CurveParams, ObricPool};
pub use pool::{AnimePool, AuxPool, DexKind, PancakePool, Pool, PontemCurve, PontemPool, QuoteError};
pub use provider::PoolProvider;
pub use rebate::BasiqPool;

//! Pool sum type and the uniform quoting surface
//!
//! The set of supported DEXes is closed, so pools are a tagged union rather
//! than a trait object: exhaustive matches catch a missing formula at compile
//! time, and catalog snapshots stay plain values.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use waypoint_core::{CoinInfo, StructTag, TypeTag};

use crate::directional::AptoswapPool;
use crate::math;
use crate::piecewise::ObricPool;
use crate::rebate::BasiqPool;

/// Fee scale shared by the basis-point formulas (1 bp = 1/10000).
pub const FEE_SCALE: u64 = 10_000;

const PANCAKE_FEE_BPS: u64 = 25;
const ANIME_FEE_BPS: u64 = 30;
const PONTEM_FEE_BPS: u64 = 30;

/// DEX identifiers with the numeric IDs used by the routing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DexKind {
    Hippo = 1,
    Econia = 2,
    Pontem = 3,
    Basiq = 4,
    Ditto = 5,
    Tortuga = 6,
    Aptoswap = 7,
    Aux = 8,
    Anime = 9,
    Cetus = 10,
    Pancake = 11,
    Obric = 12,
}

impl DexKind {
    /// Wire discriminant passed to the routing contract.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DexKind::Hippo => "Hippo",
            DexKind::Econia => "Econia",
            DexKind::Pontem => "Pontem",
            DexKind::Basiq => "Basiq",
            DexKind::Ditto => "Ditto",
            DexKind::Tortuga => "Tortuga",
            DexKind::Aptoswap => "Aptoswap",
            DexKind::Aux => "Aux",
            DexKind::Anime => "AnimeSwap",
            DexKind::Cetus => "Cetus",
            DexKind::Pancake => "Pancake",
            DexKind::Obric => "Obric",
        }
    }
}

impl fmt::Display for DexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quoting failures. These are domain errors the caller can act on;
/// malformed routes and same-token queries panic instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("negative input amount")]
    NegativeInput,

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("{dex} does not support {operation}")]
    Unsupported {
        dex: DexKind,
        operation: &'static str,
    },
}

/// Pancake-style pair: flat 25 bps constant product.
#[derive(Debug, Clone)]
pub struct PancakePool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    /// Address hosting the direct `router::swap_exact_input` entry function.
    pub script_address: String,
}

/// AnimeSwap pair: flat 30 bps constant product.
#[derive(Debug, Clone)]
pub struct AnimePool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
}

/// Aux pair: constant product with a per-pool fee, freezable by admin.
#[derive(Debug, Clone)]
pub struct AuxPool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    pub fee_bps: u64,
    pub frozen: bool,
    /// Address hosting the direct `amm::swap_exact_coin_for_coin_with_signer`
    /// entry function.
    pub script_address: String,
}

/// Liquidswap curve selector, taken from the pool's third type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PontemCurve {
    Uncorrelated,
    Stable,
}

/// Pontem (liquidswap) pair. Only the uncorrelated curve is priced here;
/// stable-curve pools surface `QuoteError::Unsupported`.
#[derive(Debug, Clone)]
pub struct PontemPool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    pub curve: PontemCurve,
    /// The LP/curve struct tag, forwarded as the step's extra type argument.
    pub lp_tag: StructTag,
}

/// A live pool on one of the supported DEXes.
#[derive(Debug, Clone)]
pub enum Pool {
    Pontem(PontemPool),
    Basiq(BasiqPool),
    Aptoswap(AptoswapPool),
    Aux(AuxPool),
    Anime(AnimePool),
    Pancake(PancakePool),
    Obric(ObricPool),
}

impl Pool {
    pub fn dex_kind(&self) -> DexKind {
        match self {
            Pool::Pontem(_) => DexKind::Pontem,
            Pool::Basiq(_) => DexKind::Basiq,
            Pool::Aptoswap(_) => DexKind::Aptoswap,
            Pool::Aux(_) => DexKind::Aux,
            Pool::Anime(_) => DexKind::Anime,
            Pool::Pancake(_) => DexKind::Pancake,
            Pool::Obric(_) => DexKind::Obric,
        }
    }

    /// Sub-kind within a DEX. All current pool families use 0.
    pub fn pool_kind(&self) -> u64 {
        0
    }

    pub fn x_coin(&self) -> &CoinInfo {
        match self {
            Pool::Pontem(p) => &p.x,
            Pool::Basiq(p) => &p.x,
            Pool::Aptoswap(p) => &p.x,
            Pool::Aux(p) => &p.x,
            Pool::Anime(p) => &p.x,
            Pool::Pancake(p) => &p.x,
            Pool::Obric(p) => &p.x,
        }
    }

    pub fn y_coin(&self) -> &CoinInfo {
        match self {
            Pool::Pontem(p) => &p.y,
            Pool::Basiq(p) => &p.y,
            Pool::Aptoswap(p) => &p.y,
            Pool::Aux(p) => &p.y,
            Pool::Anime(p) => &p.y,
            Pool::Pancake(p) => &p.y,
            Pool::Obric(p) => &p.y,
        }
    }

    /// Whether this pool may serve as a non-terminal leg of a route.
    /// Frozen pools still appear in direct quotes but are excluded from
    /// multi-hop chaining.
    pub fn is_routable(&self) -> bool {
        match self {
            Pool::Aux(p) => !p.frozen,
            Pool::Aptoswap(p) => !p.frozen,
            _ => true,
        }
    }

    /// Quote `input` units of the source coin, returning the output amount.
    pub fn quote(&self, input: &BigInt, x_to_y: bool) -> Result<BigInt, QuoteError> {
        match self {
            Pool::Pancake(p) => {
                let (rin, rout) = oriented(&p.reserve_x, &p.reserve_y, x_to_y);
                math::amount_out(input, rin, rout, PANCAKE_FEE_BPS, FEE_SCALE)
            }
            Pool::Anime(p) => {
                let (rin, rout) = oriented(&p.reserve_x, &p.reserve_y, x_to_y);
                math::amount_out(input, rin, rout, ANIME_FEE_BPS, FEE_SCALE)
            }
            Pool::Aux(p) => {
                let (rin, rout) = oriented(&p.reserve_x, &p.reserve_y, x_to_y);
                math::amount_out(input, rin, rout, p.fee_bps, FEE_SCALE)
            }
            Pool::Pontem(p) => match p.curve {
                PontemCurve::Uncorrelated => {
                    let (rin, rout) = oriented(&p.reserve_x, &p.reserve_y, x_to_y);
                    math::amount_out(input, rin, rout, PONTEM_FEE_BPS, FEE_SCALE)
                }
                PontemCurve::Stable => Err(QuoteError::Unsupported {
                    dex: DexKind::Pontem,
                    operation: "stable curve quoting",
                }),
            },
            Pool::Aptoswap(p) => p.amount_out(input, x_to_y),
            Pool::Basiq(p) => p.amount_out(input, x_to_y),
            Pool::Obric(p) => p.amount_out(input, x_to_y),
        }
    }

    /// The per-step extra type argument expected by the routing contract.
    pub fn tag_e(&self) -> TypeTag {
        match self {
            Pool::Pontem(p) => TypeTag::Struct(p.lp_tag.clone()),
            _ => TypeTag::U8,
        }
    }

    /// Entry function and type arguments for a direct single-hop swap on the
    /// DEX's own router, when one exists. `None` means the hop must go
    /// through the routing contract.
    pub fn direct_swap_call(&self, x_to_y: bool) -> Option<(String, Vec<String>)> {
        match self {
            Pool::Pancake(p) => {
                let (from, to) = if x_to_y { (&p.x, &p.y) } else { (&p.y, &p.x) };
                Some((
                    format!("{}::router::swap_exact_input", p.script_address),
                    vec![from.full_name(), to.full_name()],
                ))
            }
            Pool::Aux(p) => Some((
                format!(
                    "{}::amm::swap_exact_coin_for_coin_with_signer",
                    p.script_address
                ),
                vec![p.x.full_name(), p.y.full_name()],
            )),
            _ => None,
        }
    }
}

fn oriented<'a>(
    reserve_x: &'a BigInt,
    reserve_y: &'a BigInt,
    x_to_y: bool,
) -> (&'a BigInt, &'a BigInt) {
    if x_to_y {
        (reserve_x, reserve_y)
    } else {
        (reserve_y, reserve_x)
    }
}

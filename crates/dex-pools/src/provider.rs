//! Pool provider trait implemented by each DEX adapter

use async_trait::async_trait;
use waypoint_core::NodeError;

use crate::pool::{DexKind, Pool};

/// Loads the current pool set of one DEX from its on-chain resources.
///
/// Implementations parse leniently: resources that fail to parse or refer to
/// coins outside the registry are skipped, not treated as errors. An `Err`
/// means the node itself could not be queried.
#[async_trait]
pub trait PoolProvider: Send + Sync {
    fn dex_kind(&self) -> DexKind;

    async fn load_pool_list(&self) -> Result<Vec<Pool>, NodeError>;
}

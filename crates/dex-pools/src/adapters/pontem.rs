//! Pontem (liquidswap) adapter
//!
//! Pool types carry three parameters: the coin pair plus a curve marker.
//! The curve tag rides along on each routing step as the extra type
//! argument.

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use tracing::debug;
use waypoint_core::{NodeError, TypeTag};

use crate::adapters::{big_nested, resolve_pair};
use crate::pool::{DexKind, PontemCurve, PontemPool, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "liquidity_pool::LiquidityPool";
const UNCORRELATED_CURVE: &str = "Uncorrelated";

pub struct PontemProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl PontemProvider {
    pub fn new(client: NodeClient, registry: Arc<CoinRegistry>, address: String) -> Self {
        Self {
            client,
            registry,
            address,
        }
    }
}

fn parse_pool(registry: &CoinRegistry, resource: &AccountResource) -> Option<Pool> {
    let (tag, x, y) = resolve_pair(registry, &resource.type_)?;
    if tag.type_params.len() < 3 {
        debug!(resource_type = %resource.type_, "skipping pool without a curve param");
        return None;
    }
    let lp_tag = match &tag.type_params[2] {
        TypeTag::Struct(curve) => curve.clone(),
        _ => {
            debug!(resource_type = %resource.type_, "skipping pool with non-struct curve");
            return None;
        }
    };
    let curve = if lp_tag.name == UNCORRELATED_CURVE {
        PontemCurve::Uncorrelated
    } else {
        PontemCurve::Stable
    };
    let reserve_x = big_nested(&resource.data, "coin_x_reserve")?;
    let reserve_y = big_nested(&resource.data, "coin_y_reserve")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    Some(Pool::Pontem(PontemPool {
        x,
        y,
        reserve_x,
        reserve_y,
        curve,
        lp_tag,
    }))
}

#[async_trait]
impl PoolProvider for PontemProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Pontem
    }

    async fn load_pool_list(&self) -> Result<Vec<Pool>, NodeError> {
        let resources = self.client.get_account_resources(&self.address).await?;
        Ok(resources
            .iter()
            .filter(|r| r.type_.contains(POOL_MARKER))
            .filter_map(|r| parse_pool(&self.registry, r))
            .collect())
    }
}

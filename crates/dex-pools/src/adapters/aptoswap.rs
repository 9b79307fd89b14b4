//! Aptoswap adapter
//!
//! Fee fields arrive as strings while the pool kind and fee direction are
//! JSON numbers. Pools with an empty side are skipped at load time.

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use waypoint_core::NodeError;

use crate::adapters::{big_nested, bool_field, number_field, resolve_pair, u64_field};
use crate::directional::{AptoswapPool, FeeDirection, DEFAULT_BPS_SCALE};
use crate::pool::{DexKind, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "pool::Pool";
const FEE_DIRECTION_X: f64 = 200.0;

pub struct AptoswapProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl AptoswapProvider {
    pub fn new(client: NodeClient, registry: Arc<CoinRegistry>, address: String) -> Self {
        Self {
            client,
            registry,
            address,
        }
    }
}

fn parse_pool(registry: &CoinRegistry, resource: &AccountResource) -> Option<Pool> {
    let (_, x, y) = resolve_pair(registry, &resource.type_)?;
    let fee_direction = if number_field(&resource.data, "fee_direction")? == FEE_DIRECTION_X {
        FeeDirection::X
    } else {
        FeeDirection::Y
    };
    let reserve_x = big_nested(&resource.data, "x")?;
    let reserve_y = big_nested(&resource.data, "y")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    let frozen = bool_field(&resource.data, "freeze")?;
    Some(Pool::Aptoswap(AptoswapPool {
        x,
        y,
        reserve_x,
        reserve_y,
        fee_direction,
        admin_fee_bps: u64_field(&resource.data, "admin_fee")?,
        lp_fee_bps: u64_field(&resource.data, "lp_fee")?,
        incentive_fee_bps: u64_field(&resource.data, "incentive_fee")?,
        connect_fee_bps: u64_field(&resource.data, "connect_fee")?,
        bps_scale: DEFAULT_BPS_SCALE,
        frozen,
    }))
}

#[async_trait]
impl PoolProvider for AptoswapProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Aptoswap
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

//! Basiq adapter

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use waypoint_core::NodeError;

use crate::adapters::{big_field, big_nested, resolve_pair};
use crate::pool::{DexKind, Pool};
use crate::provider::PoolProvider;
use crate::rebate::BasiqPool;

const POOL_MARKER: &str = "dex::BasiqPoolV1";

pub struct BasiqProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl BasiqProvider {
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
    let reserve_x = big_nested(&resource.data, "x_reserve")?;
    let reserve_y = big_nested(&resource.data, "y_reserve")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    Some(Pool::Basiq(BasiqPool {
        x,
        y,
        reserve_x,
        reserve_y,
        fee_bps: big_field(&resource.data, "fee_bips")?,
        rebate_bps: big_field(&resource.data, "rebate_bips")?,
        x_adjust: big_field(&resource.data, "x_decimal_adjustment")?,
        y_adjust: big_field(&resource.data, "y_decimal_adjustment")?,
        x_price: big_field(&resource.data, "x_price")?,
        y_price: big_field(&resource.data, "y_price")?,
    }))
}

#[async_trait]
impl PoolProvider for BasiqProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Basiq
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

//! PancakeSwap adapter
//!
//! Pancake stores reserves as plain string fields on `swap::TokenPairReserve`
//! rather than wrapped coin values.

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use waypoint_core::NodeError;

use crate::adapters::{big_field, resolve_pair};
use crate::pool::{DexKind, PancakePool, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "swap::TokenPairReserve";

pub struct PancakeProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl PancakeProvider {
    pub fn new(client: NodeClient, registry: Arc<CoinRegistry>, address: String) -> Self {
        Self {
            client,
            registry,
            address,
        }
    }
}

fn parse_pool(registry: &CoinRegistry, address: &str, resource: &AccountResource) -> Option<Pool> {
    let (_, x, y) = resolve_pair(registry, &resource.type_)?;
    let reserve_x = big_field(&resource.data, "reserve_x")?;
    let reserve_y = big_field(&resource.data, "reserve_y")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    Some(Pool::Pancake(PancakePool {
        x,
        y,
        reserve_x,
        reserve_y,
        script_address: address.to_string(),
    }))
}

#[async_trait]
impl PoolProvider for PancakeProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Pancake
    }

    async fn load_pool_list(&self) -> Result<Vec<Pool>, NodeError> {
        let resources = self.client.get_account_resources(&self.address).await?;
        Ok(resources
            .iter()
            .filter(|r| r.type_.contains(POOL_MARKER))
            .filter_map(|r| parse_pool(&self.registry, &self.address, r))
            .collect())
    }
}

//! Aux adapter
//!
//! Aux pools carry their fee on-chain and can be frozen by the exchange
//! admin; frozen pools are loaded but marked unroutable.

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use waypoint_core::NodeError;

use crate::adapters::{big_nested, bool_field, resolve_pair, u64_field};
use crate::pool::{AuxPool, DexKind, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "amm::Pool";

pub struct AuxProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl AuxProvider {
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
    let reserve_x = big_nested(&resource.data, "x_reserve")?;
    let reserve_y = big_nested(&resource.data, "y_reserve")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    let fee_bps = u64_field(&resource.data, "fee_bps")?;
    let frozen = bool_field(&resource.data, "frozen")?;
    Some(Pool::Aux(AuxPool {
        x,
        y,
        reserve_x,
        reserve_y,
        fee_bps,
        frozen,
        script_address: address.to_string(),
    }))
}

#[async_trait]
impl PoolProvider for AuxProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Aux
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

//! AnimeSwap adapter

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use num_traits::Zero;
use waypoint_core::NodeError;

use crate::adapters::{big_nested, resolve_pair};
use crate::pool::{AnimePool, DexKind, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "AnimeSwapPoolV1::LiquidityPool";

pub struct AnimeProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl AnimeProvider {
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
    let reserve_x = big_nested(&resource.data, "coin_x_reserve")?;
    let reserve_y = big_nested(&resource.data, "coin_y_reserve")?;
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return None;
    }
    Some(Pool::Anime(AnimePool {
        x,
        y,
        reserve_x,
        reserve_y,
    }))
}

#[async_trait]
impl PoolProvider for AnimeProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Anime
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

//! Obric adapter
//!
//! Curve constants use the pool's capitalized Move field names (`K`, `Xa`)
//! next to snake_case state fields.

use std::sync::Arc;

use aptos_node_client::{AccountResource, NodeClient};
use async_trait::async_trait;
use coin_registry::CoinRegistry;
use waypoint_core::NodeError;

use crate::adapters::{big_field, big_nested, resolve_pair};
use crate::piecewise::{CurveParams, ObricPool};
use crate::pool::{DexKind, Pool};
use crate::provider::PoolProvider;

const POOL_MARKER: &str = "piece_swap::PieceSwapPoolInfo";

pub struct ObricProvider {
    client: NodeClient,
    registry: Arc<CoinRegistry>,
    address: String,
}

impl ObricProvider {
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
    let params = CurveParams {
        k: big_field(&resource.data, "K")?,
        k2: big_field(&resource.data, "K2")?,
        xa: big_field(&resource.data, "Xa")?,
        xb: big_field(&resource.data, "Xb")?,
        m: big_field(&resource.data, "m")?,
        n: big_field(&resource.data, "n")?,
    };
    Some(Pool::Obric(ObricPool {
        x,
        y,
        reserve_x: big_nested(&resource.data, "reserve_x")?,
        reserve_y: big_nested(&resource.data, "reserve_y")?,
        params,
        x_deci_mult: big_field(&resource.data, "x_deci_mult")?,
        y_deci_mult: big_field(&resource.data, "y_deci_mult")?,
        swap_fee_per_million: big_field(&resource.data, "swap_fee_per_million")?,
    }))
}

#[async_trait]
impl PoolProvider for ObricProvider {
    fn dex_kind(&self) -> DexKind {
        DexKind::Obric
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::registry_with;
    use num_bigint::BigInt;
    use serde_json::json;

    #[test]
    fn test_parse_pool() {
        let registry = registry_with(&[
            ("APT", "0x1::aptos_coin::AptosCoin"),
            ("USDC", "0xf22b::asset::USDC"),
        ]);
        let resource = AccountResource {
            type_: "0xc7ea::piece_swap::PieceSwapPoolInfo<0x1::aptos_coin::AptosCoin, 0xf22b::asset::USDC>"
                .to_string(),
            data: json!({
                "K": "1221000",
                "K2": "10500",
                "Xa": "100",
                "Xb": "110",
                "m": "1000",
                "n": "5",
                "protocol_fee_share_per_thousand": "200",
                "swap_fee_per_million": "1000",
                "x_deci_mult": "1",
                "y_deci_mult": "100",
                "reserve_x": {"value": "500000000"},
                "reserve_y": {"value": "5000000"},
                "protocol_fee_x": {"value": "0"},
                "protocol_fee_y": {"value": "0"}
            }),
        };
        let pool = parse_pool(&registry, &resource).unwrap();
        assert_eq!(pool.dex_kind(), DexKind::Obric);
        match pool {
            Pool::Obric(p) => {
                assert_eq!(p.params.k, BigInt::from(1_221_000));
                assert_eq!(p.params.xa, BigInt::from(100));
                assert_eq!(p.y_deci_mult, BigInt::from(100));
                assert_eq!(p.swap_fee_per_million, BigInt::from(1000));
                assert_eq!(p.reserve_x, BigInt::from(500_000_000));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_curve_constant_skipped() {
        let registry = registry_with(&[
            ("APT", "0x1::aptos_coin::AptosCoin"),
            ("USDC", "0xf22b::asset::USDC"),
        ]);
        let resource = AccountResource {
            type_: "0xc7ea::piece_swap::PieceSwapPoolInfo<0x1::aptos_coin::AptosCoin, 0xf22b::asset::USDC>"
                .to_string(),
            data: json!({
                "K": "1221000",
                "reserve_x": {"value": "500000000"},
                "reserve_y": {"value": "5000000"}
            }),
        };
        assert!(parse_pool(&registry, &resource).is_none());
    }
}

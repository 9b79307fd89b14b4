//! Per-DEX pool adapters
//!
//! One adapter per DEX, each scanning the publisher's account resources for
//! its pool marker type and parsing pool state out of the resource data.
//! Parsing is lenient throughout: a malformed resource or a pool over coins
//! missing from the registry is skipped with a debug log, never an error.

pub mod anime;
pub mod aptoswap;
pub mod aux;
pub mod basiq;
pub mod obric;
pub mod pancake;
pub mod pontem;

pub use anime::AnimeProvider;
pub use aptoswap::AptoswapProvider;
pub use aux::AuxProvider;
pub use basiq::BasiqProvider;
pub use obric::ObricProvider;
pub use pancake::PancakeProvider;
pub use pontem::PontemProvider;

use num_bigint::BigInt;
use serde_json::Value;
use tracing::debug;
use waypoint_core::{CoinInfo, StructTag, TypeTag};

use coin_registry::CoinRegistry;

/// Parse a pool resource type and resolve its first two type parameters
/// through the registry. Returns the pool's own struct tag alongside the
/// coin pair.
pub(crate) fn resolve_pair(
    registry: &CoinRegistry,
    resource_type: &str,
) -> Option<(StructTag, CoinInfo, CoinInfo)> {
    let tag = match StructTag::parse(resource_type) {
        Ok(tag) => tag,
        Err(e) => {
            debug!(resource_type, "skipping pool with unparseable type: {e}");
            return None;
        }
    };
    if tag.type_params.len() < 2 {
        debug!(resource_type, "skipping pool without a coin pair");
        return None;
    }
    let (x_tag, y_tag) = match (&tag.type_params[0], &tag.type_params[1]) {
        (TypeTag::Struct(x), TypeTag::Struct(y)) => (x.clone(), y.clone()),
        _ => {
            debug!(resource_type, "skipping pool with non-struct coin params");
            return None;
        }
    };
    let x = registry.by_struct_tag(&x_tag)?.clone();
    let y = registry.by_struct_tag(&y_tag)?.clone();
    Some((tag, x, y))
}

/// Decimal integer stored as a JSON string field.
pub(crate) fn big_field(data: &Value, field: &str) -> Option<BigInt> {
    data.get(field)?.as_str()?.parse().ok()
}

/// Decimal integer stored under the `{"value": "..."}` coin wrapper.
pub(crate) fn big_nested(data: &Value, field: &str) -> Option<BigInt> {
    data.get(field)?.get("value")?.as_str()?.parse().ok()
}

pub(crate) fn u64_field(data: &Value, field: &str) -> Option<u64> {
    data.get(field)?.as_str()?.parse().ok()
}

pub(crate) fn bool_field(data: &Value, field: &str) -> Option<bool> {
    data.get(field)?.as_bool()
}

/// Numeric field the node serializes as a JSON number.
pub(crate) fn number_field(data: &Value, field: &str) -> Option<f64> {
    data.get(field)?.as_f64()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn coin(symbol: &str, type_str: &str) -> CoinInfo {
        CoinInfo {
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 8,
            token_type: TypeTag::parse(type_str).unwrap(),
        }
    }

    pub fn registry_with(coins: &[(&str, &str)]) -> CoinRegistry {
        CoinRegistry::new(coins.iter().map(|(s, t)| coin(s, t)).collect())
    }
}

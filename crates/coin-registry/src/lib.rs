//! coin-registry: The token directory
//!
//! Maps canonical Move type names to coin metadata. Route enumeration walks
//! the full directory when hunting for intermediate tokens, and pool adapters
//! resolve the coins named in a pool's type parameters through it; pools over
//! unknown coins are dropped.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;
use waypoint_core::{CoinInfo, Error, Result, StructTag, TypeTag};

/// One entry in the standard token-list JSON.
#[derive(Debug, Deserialize)]
struct RawCoinEntry {
    name: String,
    symbol: String,
    decimals: u8,
    token_type: RawTokenType,
}

#[derive(Debug, Deserialize)]
struct RawTokenType {
    #[serde(rename = "type")]
    type_: String,
}

/// Token directory keyed by canonical type full name.
#[derive(Debug, Clone, Default)]
pub struct CoinRegistry {
    coins: Vec<CoinInfo>,
    by_full_name: HashMap<String, usize>,
}

impl CoinRegistry {
    /// Build a registry from coin metadata. A later entry with the same
    /// type replaces the earlier one.
    pub fn new(coins: Vec<CoinInfo>) -> Self {
        let mut registry = Self::default();
        for coin in coins {
            registry.insert(coin);
        }
        registry
    }

    /// Load from the standard token-list JSON
    /// (`[{name, symbol, decimals, token_type: {type}}, ...]`).
    /// Entries that fail to parse are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;

        let mut registry = Self::default();
        for entry in entries {
            let raw: RawCoinEntry = match serde_json::from_value(entry) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("skipping malformed coin entry: {e}");
                    continue;
                }
            };
            let token_type = match TypeTag::parse(&raw.token_type.type_) {
                Ok(tag) => tag,
                Err(e) => {
                    warn!(symbol = %raw.symbol, "skipping coin with bad type tag: {e}");
                    continue;
                }
            };
            registry.insert(CoinInfo {
                name: raw.name,
                symbol: raw.symbol,
                decimals: raw.decimals,
                token_type,
            });
        }
        Ok(registry)
    }

    fn insert(&mut self, coin: CoinInfo) {
        let full_name = coin.full_name();
        match self.by_full_name.get(&full_name) {
            Some(&idx) => self.coins[idx] = coin,
            None => {
                self.by_full_name.insert(full_name, self.coins.len());
                self.coins.push(coin);
            }
        }
    }

    pub fn by_full_name(&self, full_name: &str) -> Option<&CoinInfo> {
        self.by_full_name.get(full_name).map(|&idx| &self.coins[idx])
    }

    pub fn by_type_tag(&self, tag: &TypeTag) -> Option<&CoinInfo> {
        self.by_full_name(&tag.to_string())
    }

    pub fn by_struct_tag(&self, tag: &StructTag) -> Option<&CoinInfo> {
        self.by_full_name(&tag.to_string())
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.by_full_name.contains_key(full_name)
    }

    /// The full directory, in insertion order.
    pub fn all(&self) -> &[CoinInfo] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

//! Configuration types for Waypoint

use serde::{Deserialize, Serialize};

/// On-chain address of the multi-step routing contract.
pub const AGGREGATOR_ADDRESS: &str =
    "0x89576037b3cc0b89645ea393a47787bb348272c76d6941c574b053672b848039";

/// Fullnode connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Fullnode REST URL (e.g., "https://fullnode.mainnet.aptoslabs.com")
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "https://fullnode.mainnet.aptoslabs.com".to_string(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Publisher addresses scanned for pool resources, one per DEX.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexAddresses {
    pub basiq: String,
    pub aux: String,
    pub pontem: String,
    pub aptoswap: String,
    pub anime: String,
    pub pancake: String,
    pub obric: String,
}

impl Default for DexAddresses {
    fn default() -> Self {
        Self {
            basiq: "0x4885b08864b81ca42b19c38fff2eb958b5e312b1ec366014d4afff2775c19aab"
                .to_string(),
            aux: "0xbd35135844473187163ca197ca93b2ab014370587bb0ed3befff9e902d6bb541".to_string(),
            pontem: "0x05a97986a9d031c4567e15b797be516910cfcb4156312482efc6a19c0a30c948"
                .to_string(),
            aptoswap: "0xa5d3ac4d429052674ed38adc62d010e52d7c24ca159194d17ddc196ddb7e480b"
                .to_string(),
            anime: "0x796900ebe1a1a54ff9e932f19c548f5c1af5c6e7d34965857ac2f7b1d1ab2cbf"
                .to_string(),
            pancake: "0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa"
                .to_string(),
            obric: "0xc7ea756470f72ae761b7986e4ed6fd409aad183b1b2d3d2f674d979852f45c4b"
                .to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Fullnode connection settings
    #[serde(default)]
    pub node: NodeConfig,

    /// DEX publisher addresses
    #[serde(default)]
    pub dexes: DexAddresses,

    /// Routing contract address
    #[serde(default = "default_aggregator_address")]
    pub aggregator_address: String,
}

fn default_aggregator_address() -> String {
    AGGREGATOR_ADDRESS.to_string()
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            dexes: DexAddresses::default(),
            aggregator_address: default_aggregator_address(),
        }
    }
}

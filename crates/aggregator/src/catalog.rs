//! Pool catalog: a point-in-time snapshot of every loaded pool
//!
//! Adapters load concurrently and best-effort. A DEX whose node query fails
//! contributes no pools and is recorded in `failures`, leaving the rest of
//! the catalog usable.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;
use waypoint_core::NodeError;

use dex_pools::{DexKind, Pool, PoolProvider};

/// One DEX whose pool load failed.
#[derive(Debug)]
pub struct AdapterFailure {
    pub dex: DexKind,
    pub error: NodeError,
}

/// Snapshot of all loaded pools, indexed by both endpoint coins.
#[derive(Debug, Default)]
pub struct PoolCatalog {
    pools: Vec<Arc<Pool>>,
    by_token: HashMap<String, Vec<Arc<Pool>>>,
    failures: Vec<AdapterFailure>,
}

impl PoolCatalog {
    pub fn from_pools(pools: Vec<Pool>) -> Self {
        let pools: Vec<Arc<Pool>> = pools.into_iter().map(Arc::new).collect();
        let mut by_token: HashMap<String, Vec<Arc<Pool>>> = HashMap::new();
        for pool in &pools {
            by_token
                .entry(pool.x_coin().full_name())
                .or_default()
                .push(Arc::clone(pool));
            by_token
                .entry(pool.y_coin().full_name())
                .or_default()
                .push(Arc::clone(pool));
        }
        Self {
            pools,
            by_token,
            failures: Vec::new(),
        }
    }

    /// Query every provider concurrently and build a fresh snapshot.
    pub async fn load(providers: &[Box<dyn PoolProvider>]) -> Self {
        let results = join_all(providers.iter().map(|p| p.load_pool_list())).await;

        let mut pools = Vec::new();
        let mut failures = Vec::new();
        for (provider, result) in providers.iter().zip(results) {
            match result {
                Ok(loaded) => pools.extend(loaded),
                Err(error) => {
                    warn!(dex = %provider.dex_kind(), "pool load failed: {error}");
                    failures.push(AdapterFailure {
                        dex: provider.dex_kind(),
                        error,
                    });
                }
            }
        }
        let mut catalog = Self::from_pools(pools);
        catalog.failures = failures;
        catalog
    }

    pub fn pools(&self) -> &[Arc<Pool>] {
        &self.pools
    }

    /// Every pool with the given coin on either side.
    pub fn pools_touching(&self, full_name: &str) -> &[Arc<Pool>] {
        self.by_token
            .get(full_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn failures(&self) -> &[AdapterFailure] {
        &self.failures
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Number of distinct coins appearing in at least one pool.
    pub fn token_count(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

//! aggregator: Multi-hop route search and quoting
//!
//! Combines the coin directory, the pool catalog, and the per-DEX adapters
//! into one query surface: enumerate conversion routes between two coins,
//! quote them with exact integer math, rank by output, and build the
//! transaction payload for the winner.

pub mod catalog;
pub mod payload;
pub mod route;
pub mod search;

pub use catalog::{AdapterFailure, PoolCatalog};
pub use payload::{EntryFunctionPayload, PayloadArg};
pub use route::{RouteQuote, TradeRoute, TradeStep};

use std::sync::Arc;

use num_bigint::BigInt;
use tracing::debug;
use waypoint_core::{CoinInfo, DexAddresses};

use aptos_node_client::NodeClient;
use coin_registry::CoinRegistry;
use dex_pools::{
    AnimeProvider, AptoswapProvider, AuxProvider, BasiqProvider, ObricProvider, PancakeProvider,
    PontemProvider, PoolProvider, QuoteError,
};

/// The full adapter set, one provider per supported DEX, scanning the
/// configured publisher addresses.
pub fn standard_providers(
    client: &NodeClient,
    registry: &Arc<CoinRegistry>,
    dexes: &DexAddresses,
) -> Vec<Box<dyn PoolProvider>> {
    vec![
        Box::new(PontemProvider::new(
            client.clone(),
            registry.clone(),
            dexes.pontem.clone(),
        )),
        Box::new(BasiqProvider::new(
            client.clone(),
            registry.clone(),
            dexes.basiq.clone(),
        )),
        Box::new(AptoswapProvider::new(
            client.clone(),
            registry.clone(),
            dexes.aptoswap.clone(),
        )),
        Box::new(AuxProvider::new(
            client.clone(),
            registry.clone(),
            dexes.aux.clone(),
        )),
        Box::new(AnimeProvider::new(
            client.clone(),
            registry.clone(),
            dexes.anime.clone(),
        )),
        Box::new(PancakeProvider::new(
            client.clone(),
            registry.clone(),
            dexes.pancake.clone(),
        )),
        Box::new(ObricProvider::new(
            client.clone(),
            registry.clone(),
            dexes.obric.clone(),
        )),
    ]
}

/// Route search and quoting over a set of DEX adapters.
///
/// The catalog starts empty; call [`reload`](Self::reload) to populate it
/// and again whenever fresh reserves are wanted. Queries between reloads
/// see a consistent snapshot.
pub struct TradeAggregator {
    registry: Arc<CoinRegistry>,
    providers: Vec<Box<dyn PoolProvider>>,
    catalog: PoolCatalog,
}

impl TradeAggregator {
    pub fn new(registry: Arc<CoinRegistry>, providers: Vec<Box<dyn PoolProvider>>) -> Self {
        Self {
            registry,
            providers,
            catalog: PoolCatalog::default(),
        }
    }

    /// Reload every adapter's pool list, replacing the current snapshot.
    /// Returns the per-DEX failures of this load; pools from healthy
    /// adapters are kept regardless.
    pub async fn reload(&mut self) -> &[AdapterFailure] {
        self.catalog = PoolCatalog::load(&self.providers).await;
        self.catalog.failures()
    }

    pub fn registry(&self) -> &CoinRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &PoolCatalog {
        &self.catalog
    }

    /// Every route from `x` to `y` up to `max_steps` hops.
    pub fn all_routes(
        &self,
        x: &CoinInfo,
        y: &CoinInfo,
        max_steps: usize,
        allow_round_trip: bool,
    ) -> Vec<TradeRoute> {
        search::all_routes(&self.catalog, &self.registry, x, y, max_steps, allow_round_trip)
    }

    /// Quote every route, best output first. Routes a pool cannot serve
    /// (drained reserves, unsupported curve) are dropped; an invalid input
    /// amount fails the whole query.
    pub fn quotes(
        &self,
        input_amount: &BigInt,
        x: &CoinInfo,
        y: &CoinInfo,
        max_steps: usize,
        allow_round_trip: bool,
    ) -> Result<Vec<RouteQuote>, QuoteError> {
        let routes = self.all_routes(x, y, max_steps, allow_round_trip);
        let mut quotes = Vec::with_capacity(routes.len());
        for route in routes {
            match route.quote(input_amount) {
                Ok(output_amount) => quotes.push(RouteQuote {
                    route,
                    input_amount: input_amount.clone(),
                    output_amount,
                }),
                Err(QuoteError::NegativeInput) => return Err(QuoteError::NegativeInput),
                Err(e) => {
                    debug!("dropping unquotable route: {e}");
                }
            }
        }
        quotes.sort_by(|a, b| b.output_amount.cmp(&a.output_amount));
        Ok(quotes)
    }

    /// The single best quote, or `None` when no route exists.
    pub fn best_quote(
        &self,
        input_amount: &BigInt,
        x: &CoinInfo,
        y: &CoinInfo,
        max_steps: usize,
        allow_round_trip: bool,
    ) -> Result<Option<RouteQuote>, QuoteError> {
        let mut quotes = self.quotes(input_amount, x, y, max_steps, allow_round_trip)?;
        if quotes.is_empty() {
            return Ok(None);
        }
        Ok(Some(quotes.swap_remove(0)))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use num_bigint::BigInt;
    use waypoint_core::{CoinInfo, StructTag, TypeTag};

    use coin_registry::CoinRegistry;
    use dex_pools::{
        AnimePool, AuxPool, PancakePool, PontemCurve, PontemPool, Pool,
    };

    pub fn coin(symbol: &str, type_str: &str) -> CoinInfo {
        CoinInfo {
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 8,
            token_type: TypeTag::parse(type_str).unwrap(),
        }
    }

    pub fn registry_with(coins: &[&CoinInfo]) -> CoinRegistry {
        CoinRegistry::new(coins.iter().map(|c| (*c).clone()).collect())
    }

    pub fn anime_pool_value(x: CoinInfo, y: CoinInfo, reserve_x: u64, reserve_y: u64) -> Pool {
        Pool::Anime(AnimePool {
            x,
            y,
            reserve_x: BigInt::from(reserve_x),
            reserve_y: BigInt::from(reserve_y),
        })
    }

    pub fn anime_pool(x: CoinInfo, y: CoinInfo, reserve_x: u64, reserve_y: u64) -> Arc<Pool> {
        Arc::new(anime_pool_value(x, y, reserve_x, reserve_y))
    }

    pub fn pancake_pool(x: CoinInfo, y: CoinInfo, reserve_x: u64, reserve_y: u64) -> Arc<Pool> {
        Arc::new(Pool::Pancake(PancakePool {
            x,
            y,
            reserve_x: BigInt::from(reserve_x),
            reserve_y: BigInt::from(reserve_y),
            script_address: "0xpancake".to_string(),
        }))
    }

    pub fn aux_pool_value(
        x: CoinInfo,
        y: CoinInfo,
        reserve_x: u64,
        reserve_y: u64,
        fee_bps: u64,
        frozen: bool,
    ) -> Pool {
        Pool::Aux(AuxPool {
            x,
            y,
            reserve_x: BigInt::from(reserve_x),
            reserve_y: BigInt::from(reserve_y),
            fee_bps,
            frozen,
            script_address: "0xaux".to_string(),
        })
    }

    pub fn aux_pool(
        x: CoinInfo,
        y: CoinInfo,
        reserve_x: u64,
        reserve_y: u64,
        fee_bps: u64,
        frozen: bool,
    ) -> Arc<Pool> {
        Arc::new(aux_pool_value(x, y, reserve_x, reserve_y, fee_bps, frozen))
    }

    pub fn pontem_pool(x: CoinInfo, y: CoinInfo, reserve_x: u64, reserve_y: u64) -> Arc<Pool> {
        Arc::new(Pool::Pontem(PontemPool {
            x,
            y,
            reserve_x: BigInt::from(reserve_x),
            reserve_y: BigInt::from(reserve_y),
            curve: PontemCurve::Uncorrelated,
            lp_tag: StructTag::parse("0x05a9::curves::Uncorrelated").unwrap(),
        }))
    }
}

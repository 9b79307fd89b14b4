//! Best-route quoting from the command line
//!
//! Loads the coin directory and every DEX's pool state, then prints the
//! ranked conversion routes for one query.

use std::sync::Arc;
use std::{env, fs};

use anyhow::{bail, Context, Result};
use num_bigint::BigInt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aggregator::{standard_providers, TradeAggregator, TradeRoute};
use aptos_node_client::NodeClient;
use coin_registry::CoinRegistry;
use waypoint_core::{AggregatorConfig, CoinInfo};

const MAX_HOPS: usize = 3;
const QUOTES_SHOWN: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        bail!(
            "usage: {} <token-list.json> <from> <to> <amount> [config.json]",
            args[0]
        );
    }
    let token_list_path = &args[1];
    let from_query = &args[2];
    let to_query = &args[3];
    let amount: BigInt = args[4]
        .parse()
        .with_context(|| format!("invalid amount {:?}", args[4]))?;

    let config: AggregatorConfig = match args.get(5) {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?
        }
        None => AggregatorConfig::default(),
    };

    let token_list = fs::read_to_string(token_list_path)
        .with_context(|| format!("reading {token_list_path}"))?;
    let registry = Arc::new(CoinRegistry::from_json(&token_list)?);
    info!(coins = registry.len(), "coin directory loaded");

    let from = find_coin(&registry, from_query)?.clone();
    let to = find_coin(&registry, to_query)?.clone();

    let client = NodeClient::new(&config.node)?;
    let providers = standard_providers(&client, &registry, &config.dexes);
    let mut aggregator = TradeAggregator::new(registry, providers);

    for failure in aggregator.reload().await {
        warn!(dex = %failure.dex, "pool load failed: {}", failure.error);
    }
    info!(
        pools = aggregator.catalog().pool_count(),
        tokens = aggregator.catalog().token_count(),
        "pool catalog loaded"
    );

    let quotes = aggregator.quotes(&amount, &from, &to, MAX_HOPS, false)?;
    if quotes.is_empty() {
        bail!("no route from {} to {}", from.symbol, to.symbol);
    }

    println!("{} {} -> {}", amount, from.symbol, to.symbol);
    for quote in quotes.iter().take(QUOTES_SHOWN) {
        println!("  {}  out: {}", describe(&quote.route), quote.output_amount);
    }

    let best = &quotes[0];
    let payload = best
        .route
        .payload(&config.aggregator_address, u64_arg(&amount)?, 0);
    println!("payload: {}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Resolve a coin by canonical full name, falling back to the first symbol
/// match.
fn find_coin<'a>(registry: &'a CoinRegistry, query: &str) -> Result<&'a CoinInfo> {
    if let Some(coin) = registry.by_full_name(query) {
        return Ok(coin);
    }
    registry
        .all()
        .iter()
        .find(|coin| coin.symbol == query)
        .with_context(|| format!("unknown coin {query:?}"))
}

fn describe(route: &TradeRoute) -> String {
    let mut out = route.source().symbol.clone();
    for step in route.steps() {
        out.push_str(&format!(
            " -[{}]-> {}",
            step.pool.dex_kind(),
            step.output_coin().symbol
        ));
    }
    out
}

fn u64_arg(amount: &BigInt) -> Result<u64> {
    u64::try_from(amount).map_err(|_| anyhow::anyhow!("amount does not fit in u64"))
}

//! Trade steps and routes
//!
//! A step is a pool plus a direction; a route is a chain of steps where each
//! step's output coin feeds the next step's input. Route construction checks
//! the chain and panics on a mismatch, since assembling a broken route is a
//! programming error rather than a runtime condition.

use std::sync::Arc;

use num_bigint::BigInt;
use waypoint_core::{CoinInfo, TypeTag};

use dex_pools::{Pool, QuoteError};

/// A single swap on one pool in a fixed direction.
#[derive(Debug, Clone)]
pub struct TradeStep {
    pub pool: Arc<Pool>,
    pub x_to_y: bool,
}

impl TradeStep {
    pub fn new(pool: Arc<Pool>, x_to_y: bool) -> Self {
        Self { pool, x_to_y }
    }

    pub fn input_coin(&self) -> &CoinInfo {
        if self.x_to_y {
            self.pool.x_coin()
        } else {
            self.pool.y_coin()
        }
    }

    pub fn output_coin(&self) -> &CoinInfo {
        if self.x_to_y {
            self.pool.y_coin()
        } else {
            self.pool.x_coin()
        }
    }

    pub fn quote(&self, input: &BigInt) -> Result<BigInt, QuoteError> {
        self.pool.quote(input, self.x_to_y)
    }

    pub fn tag_e(&self) -> TypeTag {
        self.pool.tag_e()
    }
}

/// An ordered chain of steps from a source coin to a target coin.
#[derive(Debug, Clone)]
pub struct TradeRoute {
    tokens: Vec<CoinInfo>,
    steps: Vec<TradeStep>,
}

impl TradeRoute {
    /// Panics if `steps` is empty or the coins do not chain.
    pub fn new(steps: Vec<TradeStep>) -> Self {
        assert!(!steps.is_empty(), "route needs at least one trade step");

        let mut tokens = Vec::with_capacity(steps.len() + 1);
        let mut expected = steps[0].input_coin().full_name();
        tokens.push(steps[0].input_coin().clone());
        for step in &steps {
            let input = step.input_coin().full_name();
            assert_eq!(
                input, expected,
                "mismatching tokens in route, expected {expected} but received {input}"
            );
            expected = step.output_coin().full_name();
            tokens.push(step.output_coin().clone());
        }
        Self { tokens, steps }
    }

    pub fn steps(&self) -> &[TradeStep] {
        &self.steps
    }

    /// The coin chain, one longer than the step list.
    pub fn tokens(&self) -> &[CoinInfo] {
        &self.tokens
    }

    pub fn source(&self) -> &CoinInfo {
        &self.tokens[0]
    }

    pub fn destination(&self) -> &CoinInfo {
        &self.tokens[self.tokens.len() - 1]
    }

    /// The canonical full names of the coin chain, in trade order.
    pub fn token_chain(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.full_name()).collect()
    }

    /// Per-step `(dex, pool_kind, x_to_y)` triples, for callers assembling
    /// their own payloads.
    pub fn step_descriptors(&self) -> Vec<(dex_pools::DexKind, u64, bool)> {
        self.steps
            .iter()
            .map(|step| (step.pool.dex_kind(), step.pool.pool_kind(), step.x_to_y))
            .collect()
    }

    /// Feed the input through each step in order.
    pub fn quote(&self, input: &BigInt) -> Result<BigInt, QuoteError> {
        let mut amount = input.clone();
        for step in &self.steps {
            amount = step.quote(&amount)?;
        }
        Ok(amount)
    }

    /// True when any coin appears twice in the chain.
    pub fn has_round_trip(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.tokens
            .iter()
            .any(|token| !seen.insert(token.full_name()))
    }
}

/// A route together with its quoted amounts.
#[derive(Debug, Clone)]
pub struct RouteQuote {
    pub route: TradeRoute,
    pub input_amount: BigInt,
    pub output_amount: BigInt,
}

//! Entry-function payload construction
//!
//! Routes execute through the router contract's `one_step_route`,
//! `two_step_route`, and `three_step_route` entry functions. Type arguments
//! are the coin chain followed by one extra tag per step; value arguments
//! are each step's `(dex, pool_kind, x_to_y)` triple followed by the input
//! and minimum-output amounts.

use serde::Serialize;

use dex_pools::DexKind;

use crate::route::TradeRoute;

const ROUTER_MODULE: &str = "aggregator";

/// A value argument of an entry function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadArg {
    U8(u8),
    U64(u64),
    Bool(bool),
}

/// An Aptos entry-function transaction payload.
#[derive(Debug, Clone, Serialize)]
pub struct EntryFunctionPayload {
    pub function: String,
    pub type_args: Vec<String>,
    pub args: Vec<PayloadArg>,
}

impl TradeRoute {
    /// Build the router-contract payload for this route.
    /// Panics on routes longer than three steps, which the search never
    /// produces.
    pub fn payload(
        &self,
        aggregator_address: &str,
        input: u64,
        min_out: u64,
    ) -> EntryFunctionPayload {
        let entry = match self.steps().len() {
            1 => "one_step_route",
            2 => "two_step_route",
            3 => "three_step_route",
            n => panic!("no entry function for a {n}-step route"),
        };

        let mut type_args: Vec<String> = self
            .tokens()
            .iter()
            .map(|token| token.full_name())
            .collect();
        type_args.extend(self.steps().iter().map(|step| step.tag_e().to_string()));

        let mut args = Vec::with_capacity(self.steps().len() * 3 + 2);
        for step in self.steps() {
            args.push(PayloadArg::U8(step.pool.dex_kind().id()));
            args.push(PayloadArg::U64(step.pool.pool_kind()));
            args.push(PayloadArg::Bool(step.x_to_y));
        }
        args.push(PayloadArg::U64(input));
        args.push(PayloadArg::U64(min_out));

        EntryFunctionPayload {
            function: format!("{aggregator_address}::{ROUTER_MODULE}::{entry}"),
            type_args,
            args,
        }
    }

    /// Payload calling the DEX's own router directly, bypassing the
    /// aggregator contract. Only single-step routes on DEXes that expose a
    /// compatible entry function qualify.
    pub fn raw_payload(&self, input: u64, min_out: u64) -> Option<EntryFunctionPayload> {
        if self.steps().len() != 1 {
            return None;
        }
        let step = &self.steps()[0];
        match step.pool.dex_kind() {
            DexKind::Aux | DexKind::Pancake => {}
            _ => return None,
        }
        let (function, type_args) = step.pool.direct_swap_call(step.x_to_y)?;
        Some(EntryFunctionPayload {
            function,
            type_args,
            args: vec![PayloadArg::U64(input), PayloadArg::U64(min_out)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::TradeStep;
    use crate::test_support::{anime_pool, aux_pool, coin, pancake_pool, pontem_pool};

    #[test]
    fn test_one_step_payload() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(anime_pool(x, y, 1000, 1000), true)]);
        let payload = route.payload("0x89", 500, 490);
        assert_eq!(payload.function, "0x89::aggregator::one_step_route");
        assert_eq!(
            payload.type_args,
            vec!["0x1::x::X", "0x1::y::Y", "u8"]
        );
        assert_eq!(
            payload.args,
            vec![
                PayloadArg::U8(9),
                PayloadArg::U64(0),
                PayloadArg::Bool(true),
                PayloadArg::U64(500),
                PayloadArg::U64(490),
            ]
        );
    }

    #[test]
    fn test_two_step_payload_type_args() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let z = coin("Z", "0x1::z::Z");
        let route = TradeRoute::new(vec![
            TradeStep::new(pontem_pool(x, y.clone(), 1000, 1000), true),
            TradeStep::new(anime_pool(y, z, 1000, 1000), true),
        ]);
        let payload = route.payload("0x89", 500, 480);
        assert_eq!(payload.function, "0x89::aggregator::two_step_route");
        // Coin chain first, then one extra tag per step
        assert_eq!(
            payload.type_args,
            vec![
                "0x1::x::X",
                "0x1::y::Y",
                "0x1::z::Z",
                "0x05a9::curves::Uncorrelated",
                "u8",
            ]
        );
        assert_eq!(payload.args.len(), 8);
        assert_eq!(payload.args[0], PayloadArg::U8(3));
        assert_eq!(payload.args[3], PayloadArg::U8(9));
    }

    #[test]
    fn test_reverse_direction_encoded() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(anime_pool(y, x, 1000, 1000), false)]);
        let payload = route.payload("0x89", 100, 90);
        // Type args follow trade order, not pool order
        assert_eq!(payload.type_args[0], "0x1::x::X");
        assert_eq!(payload.type_args[1], "0x1::y::Y");
        assert_eq!(payload.args[2], PayloadArg::Bool(false));
    }

    #[test]
    fn test_raw_payload_for_pancake() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(pancake_pool(x, y, 1000, 1000), true)]);
        let payload = route.raw_payload(100, 90).unwrap();
        assert_eq!(payload.function, "0xpancake::router::swap_exact_input");
        assert_eq!(payload.type_args, vec!["0x1::x::X", "0x1::y::Y"]);
        assert_eq!(
            payload.args,
            vec![PayloadArg::U64(100), PayloadArg::U64(90)]
        );
    }

    #[test]
    fn test_raw_payload_aux_keeps_pool_order() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(
            aux_pool(x, y, 1000, 1000, 20, false),
            false,
        )]);
        let payload = route.raw_payload(100, 90).unwrap();
        assert_eq!(
            payload.function,
            "0xaux::amm::swap_exact_coin_for_coin_with_signer"
        );
        // Aux's entry function takes the pool's own pair order
        assert_eq!(payload.type_args, vec!["0x1::x::X", "0x1::y::Y"]);
    }

    #[test]
    fn test_no_raw_payload_for_multi_step() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let z = coin("Z", "0x1::z::Z");
        let route = TradeRoute::new(vec![
            TradeStep::new(pancake_pool(x, y.clone(), 1000, 1000), true),
            TradeStep::new(pancake_pool(y, z, 1000, 1000), true),
        ]);
        assert!(route.raw_payload(100, 90).is_none());
    }

    #[test]
    fn test_no_raw_payload_for_unsupported_dex() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(anime_pool(x, y, 1000, 1000), true)]);
        assert!(route.raw_payload(100, 90).is_none());
    }

    #[test]
    fn test_payload_serializes_flat_args() {
        let x = coin("X", "0x1::x::X");
        let y = coin("Y", "0x1::y::Y");
        let route = TradeRoute::new(vec![TradeStep::new(anime_pool(x, y, 1000, 1000), true)]);
        let payload = route.payload("0x89", 500, 490);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["args"], serde_json::json!([9, 0, true, 500, 490]));
    }
}

//! Basiq pools: value-balanced pricing with rebates and imbalance penalties
//!
//! Basiq prices a swap at its oracle fair value and then adjusts the fee by
//! how the trade moves the pool's value balance. Trades that improve the
//! balance earn a rebate; trades that push the pool past 75% one-sided pay a
//! quadratic penalty on top of the base fee.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use waypoint_core::CoinInfo;

use crate::pool::QuoteError;

const BPS_SCALE: u64 = 10_000;
const PENALTY_THRESHOLD: u64 = 7_500;

#[derive(Debug, Clone)]
pub struct BasiqPool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    pub fee_bps: BigInt,
    pub rebate_bps: BigInt,
    /// Multipliers normalizing both sides to a common decimal base.
    pub x_adjust: BigInt,
    pub y_adjust: BigInt,
    /// Oracle prices in the normalized base.
    pub x_price: BigInt,
    pub y_price: BigInt,
}

impl BasiqPool {
    pub fn amount_out(&self, input: &BigInt, x_to_y: bool) -> Result<BigInt, QuoteError> {
        if input.is_negative() {
            return Err(QuoteError::NegativeInput);
        }
        if self.reserve_x.is_zero() || self.reserve_y.is_zero() {
            return Err(QuoteError::InsufficientLiquidity);
        }

        let (in_adjust, out_adjust, in_price, out_price, reserve_in, reserve_out) = if x_to_y {
            (
                &self.x_adjust,
                &self.y_adjust,
                &self.x_price,
                &self.y_price,
                &self.reserve_x,
                &self.reserve_y,
            )
        } else {
            (
                &self.y_adjust,
                &self.x_adjust,
                &self.y_price,
                &self.x_price,
                &self.reserve_y,
                &self.reserve_x,
            )
        };

        let out = swap_output(
            &(input * in_adjust),
            &(reserve_in * in_adjust),
            &(reserve_out * out_adjust),
            in_price,
            out_price,
            &self.fee_bps,
            &self.rebate_bps,
        );
        Ok(out / out_adjust)
    }
}

/// Ratio of the larger side to the total, in basis points. Always in
/// [5000, 10000] for non-negative inputs.
fn imbalance_ratio(value_x: &BigInt, value_y: &BigInt) -> BigInt {
    let larger = if value_x > value_y { value_x } else { value_y };
    larger * BigInt::from(BPS_SCALE) / (value_x + value_y)
}

/// Core pricing on decimal-normalized amounts.
fn swap_output(
    input: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
    in_price: &BigInt,
    out_price: &BigInt,
    fee_bps: &BigInt,
    rebate_bps: &BigInt,
) -> BigInt {
    let scale = BigInt::from(BPS_SCALE);

    let fair_input_value = input * in_price;
    let input_reserve_value = reserve_in * in_price;
    let output_reserve_value = reserve_out * out_price;

    let pre = imbalance_ratio(&input_reserve_value, &output_reserve_value);
    let post = imbalance_ratio(
        &(&input_reserve_value + &fair_input_value),
        &(&output_reserve_value - &fair_input_value),
    );

    let fair_output = &fair_input_value / out_price;
    if post < pre {
        fair_output * (&scale - (fee_bps - rebate_bps)) / &scale
    } else if post > BigInt::from(PENALTY_THRESHOLD) {
        let surplus = (&post - BigInt::from(PENALTY_THRESHOLD)) / BigInt::from(100);
        let penalty = &surplus * &surplus * BigInt::from(2);
        fair_output * ((&scale - fee_bps) - penalty) / &scale
    } else {
        fair_output * (&scale - fee_bps) / &scale
    }
}

//! Constant-product swap math
//!
//! Exact integer arithmetic throughout. Division is floor division on
//! non-negative operands, matching on-chain behavior.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::pool::QuoteError;

/// Output of a constant-product swap with the fee taken from the input.
///
/// `out = in' * reserve_out / (reserve_in * scale + in')` where
/// `in' = in * (scale - fee_bps)`.
pub fn amount_out(
    amount_in: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
    fee_bps: u64,
    fee_scale: u64,
) -> Result<BigInt, QuoteError> {
    if amount_in.is_negative() {
        return Err(QuoteError::NegativeInput);
    }
    if reserve_in.is_zero()
        || reserve_out.is_zero()
        || reserve_in.is_negative()
        || reserve_out.is_negative()
    {
        return Err(QuoteError::InsufficientLiquidity);
    }

    let scale = BigInt::from(fee_scale);
    let in_after_fees = amount_in * (&scale - BigInt::from(fee_bps));
    let numerator = &in_after_fees * reserve_out;
    let denominator = reserve_in * &scale + &in_after_fees;
    Ok(numerator / denominator)
}

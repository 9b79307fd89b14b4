//! Aptoswap pools: constant product with direction-dependent fees
//!
//! Aptoswap splits its fee into an LP share, always charged on the input,
//! and an admin share charged on whichever side `fee_direction` names. A
//! swap into the fee side pays the admin fee up front; a swap out of it
//! pays on the output.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use waypoint_core::CoinInfo;

use crate::pool::QuoteError;

/// Which side of the pair carries the admin fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeDirection {
    X,
    Y,
}

#[derive(Debug, Clone)]
pub struct AptoswapPool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    pub fee_direction: FeeDirection,
    pub admin_fee_bps: u64,
    pub lp_fee_bps: u64,
    pub incentive_fee_bps: u64,
    pub connect_fee_bps: u64,
    /// Denominator the fee components are expressed against.
    pub bps_scale: u64,
    pub frozen: bool,
}

/// Scale the current pools use; the loader applies it to every pool.
pub const DEFAULT_BPS_SCALE: u64 = 10_000;

impl AptoswapPool {
    fn total_admin_fee(&self) -> BigInt {
        BigInt::from(self.admin_fee_bps + self.connect_fee_bps)
    }

    fn total_lp_fee(&self) -> BigInt {
        BigInt::from(self.incentive_fee_bps + self.lp_fee_bps)
    }

    pub fn amount_out(&self, input: &BigInt, x_to_y: bool) -> Result<BigInt, QuoteError> {
        if input.is_negative() {
            return Err(QuoteError::NegativeInput);
        }
        if self.reserve_x.is_zero() || self.reserve_y.is_zero() {
            return Err(QuoteError::InsufficientLiquidity);
        }

        let scale = BigInt::from(self.bps_scale);
        let (reserve_in, reserve_out, admin_on_input) = if x_to_y {
            (&self.reserve_x, &self.reserve_y, self.fee_direction == FeeDirection::X)
        } else {
            (&self.reserve_y, &self.reserve_x, self.fee_direction == FeeDirection::Y)
        };

        let mut amount_in = input.clone();
        if admin_on_input {
            let fee = &amount_in * self.total_admin_fee() / &scale;
            amount_in -= fee;
        }
        let lp_fee = &amount_in * self.total_lp_fee() / &scale;
        amount_in -= lp_fee;
        if amount_in.is_negative() {
            return Ok(BigInt::from(0));
        }

        let mut amount_out = reserve_out * &amount_in / (reserve_in + &amount_in);
        if !admin_on_input {
            let fee = &amount_out * self.total_admin_fee() / &scale;
            amount_out -= fee;
        }
        Ok(amount_out)
    }
}

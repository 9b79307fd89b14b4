//! Obric pools: piecewise constant-product pricing
//!
//! Obric's curve is three segments stitched together: a shifted constant
//! product in the middle band and two hyperbolic wings outside it. Reserves
//! are first mapped onto the curve by a scaling fraction `f`, the segment for
//! the current point is solved, and a trade that crosses a segment boundary
//! is split at the boundary and the remainder priced recursively on the next
//! segment.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use waypoint_core::CoinInfo;

use crate::pool::QuoteError;

const BILLION: u64 = 1_000_000_000;
const PRECISION_FACTOR: u64 = 1_000_000;
const PRECISION_FACTOR2: u64 = 1_000_000_000_000;

/// Segment boundaries and curve constants, read straight from the pool
/// resource.
#[derive(Debug, Clone)]
pub struct CurveParams {
    pub k: BigInt,
    pub k2: BigInt,
    pub xa: BigInt,
    pub xb: BigInt,
    pub m: BigInt,
    pub n: BigInt,
}

#[derive(Debug, Clone)]
pub struct ObricPool {
    pub x: CoinInfo,
    pub y: CoinInfo,
    pub reserve_x: BigInt,
    pub reserve_y: BigInt,
    pub params: CurveParams,
    pub x_deci_mult: BigInt,
    pub y_deci_mult: BigInt,
    pub swap_fee_per_million: BigInt,
}

impl ObricPool {
    pub fn amount_out(&self, input: &BigInt, x_to_y: bool) -> Result<BigInt, QuoteError> {
        if input.is_negative() {
            return Err(QuoteError::NegativeInput);
        }
        if self.reserve_x.is_zero() || self.reserve_y.is_zero() {
            return Err(QuoteError::InsufficientLiquidity);
        }

        let current_x = &self.reserve_x * &self.x_deci_mult;
        let current_y = &self.reserve_y * &self.y_deci_mult;
        let raw = if x_to_y {
            let scaled_in = input * &self.x_deci_mult;
            swap_out(&current_x, &current_y, &scaled_in, &self.params) / &self.y_deci_mult
        } else {
            let scaled_in = input * &self.y_deci_mult;
            swap_out(&current_y, &current_x, &scaled_in, &self.params) / &self.x_deci_mult
        };
        let fee = &raw * &self.swap_fee_per_million / BigInt::from(PRECISION_FACTOR);
        Ok(raw - fee)
    }
}

/// Swap along the curve, normalizing reserves into the working magnitude
/// first. Direction is encoded by argument order; the reverse direction is
/// the same curve with the axes flipped.
fn swap_out(current_x: &BigInt, current_y: &BigInt, input_x: &BigInt, p: &CurveParams) -> BigInt {
    let mut max_xy = current_x.max(current_y).clone();
    let mut numerator = BigInt::from(1);
    let mut denominator = BigInt::from(1);
    if max_xy > BigInt::from(BILLION) {
        max_xy /= 10;
        denominator *= 10;
    }
    if max_xy < BigInt::from(BILLION / 10) {
        numerator *= 10;
    }
    let preprocessed_input = input_x * &numerator / &denominator;
    let scaled_x = current_x * &numerator / &denominator;
    let scaled_y = current_y * &numerator / &denominator;

    let out = if preprocessed_input < BigInt::from(10_000) {
        swap_out_scaled(&scaled_x, &scaled_y, input_x, &numerator, &denominator, p)
    } else {
        let one = BigInt::from(1);
        swap_out_scaled(&scaled_x, &scaled_y, &preprocessed_input, &one, &one, p)
    };
    out * &denominator / BigInt::from(PRECISION_FACTOR) / &numerator
}

/// Segment-local pricing on pre-scaled reserves. The result is still scaled
/// by the precision factor; the caller unscales it.
fn swap_out_scaled(
    current_x: &BigInt,
    current_y: &BigInt,
    input_x: &BigInt,
    pp_numerator: &BigInt,
    pp_denominator: &BigInt,
    p: &CurveParams,
) -> BigInt {
    let pf = BigInt::from(PRECISION_FACTOR);
    let p_xa = &p.xa * &pf;
    let p_xb = &p.xb * &pf;
    let p_m = &p.m * &pf;
    let p_n = &p.n * &pf;
    let p_k = &p.k * BigInt::from(PRECISION_FACTOR2);
    let p_k2 = &p.k2 * BigInt::from(PRECISION_FACTOR2);

    if compare_fraction(current_x, current_y, &p.xa, &p.xb) {
        // Upper-left wing: y = k2 / x + n
        let (f_num, f_den, dydx_num, dydx_den) =
            solve_f_upper_left(current_x, current_y, &p.n, &p.k2);
        let p_current_x_f = current_x * &f_num * &pf / &f_den;
        let p_current_y_f = current_y * &f_num * &pf / &f_den;
        let p_input_x_f = (input_x * &f_num * &pf / &f_den) * pp_numerator / pp_denominator;
        let p_new_x_f = &p_current_x_f + &p_input_x_f;
        if p_new_x_f > p_xa {
            let p_output_max = mul_w(
                &(input_x * &pf * pp_numerator / pp_denominator),
                &dydx_num,
                &dydx_den,
            );
            let delta_this_stage = &p_current_y_f - &p_xb;
            let input_next_stage = (&p_new_x_f - &p_xa) / &pf;
            let one = BigInt::from(1);
            let output_next_stage =
                swap_out_scaled(&p.xa, &p.xb, &input_next_stage, &one, &one, p);
            let p_output = (delta_this_stage + output_next_stage) * &f_den / &f_num;
            p_output.min(p_output_max)
        } else {
            let p_new_y_f = &p_k2 / &p_new_x_f + &p_n;
            let p_delta_y_f = if p_current_y_f > p_new_y_f {
                &p_current_y_f - &p_new_y_f
            } else {
                BigInt::from(0)
            };
            p_delta_y_f * &f_den / &f_num
        }
    } else if compare_fraction(current_x, current_y, &p.xb, &p.xa) {
        // Middle band: (x + m)(y + m) = k
        let (f_num, f_den, dydx_num, dydx_den) =
            solve_f_middle(current_x, current_y, &p.m, &p.k);
        let p_current_x_f = current_x * &f_num * &pf / &f_den;
        let p_current_y_f = current_y * &f_num * &pf / &f_den;
        let p_input_x_f = (input_x * &f_num * &pf / &f_den) * pp_numerator / pp_denominator;
        let p_new_x_f = &p_current_x_f + &p_input_x_f;
        if p_new_x_f > p_xb {
            let p_output_max = mul_w(
                &(input_x * &pf * pp_numerator / pp_denominator),
                &dydx_num,
                &dydx_den,
            );
            let delta_this_stage = &p_current_y_f - &p_xa;
            let input_next_stage = (&p_new_x_f - &p_xb) / &pf;
            let one = BigInt::from(1);
            let output_next_stage =
                swap_out_scaled(&p.xb, &p.xa, &input_next_stage, &one, &one, p);
            let p_output = (delta_this_stage + output_next_stage) * &f_den / &f_num;
            p_output.min(p_output_max)
        } else {
            let p_new_y_f = &p_k / (&p_new_x_f + &p_m) - &p_m;
            let p_delta_y_f = &p_current_y_f - p_new_y_f;
            p_delta_y_f * &f_den / &f_num
        }
    } else {
        // Bottom-right wing: same curve as the upper-left with axes flipped
        let (f_num, f_den, _, _) = solve_f_upper_left(current_y, current_x, &p.n, &p.k2);
        let p_current_x_f = current_x * &f_num * &pf / &f_den;
        let p_current_y_f = current_y * &f_num * &pf / &f_den;
        let p_input_x_f = (input_x * &f_num * &pf / &f_den) * pp_numerator / pp_denominator;
        let p_new_x_f = &p_current_x_f + &p_input_x_f;
        let p_new_y_f = &p_k2 / (&p_new_x_f - &p_n);
        let p_delta_y_f = if p_current_y_f > p_new_y_f {
            &p_current_y_f - &p_new_y_f
        } else {
            BigInt::from(0)
        };
        p_delta_y_f * &f_den / &f_num
    }
}

/// `a/b < c/d` on non-negative integers without losing precision.
fn compare_fraction(a: &BigInt, b: &BigInt, c: &BigInt, d: &BigInt) -> bool {
    a * d < b * c
}

/// Scaling fraction `f` mapping the current point onto `y = k2/x + n`,
/// plus the tangent slope at the mapped point as a fraction.
fn solve_f_upper_left(
    x: &BigInt,
    y: &BigInt,
    n: &BigInt,
    k2: &BigInt,
) -> (BigInt, BigInt, BigInt, BigInt) {
    let xn = x * n;
    let xy = x * y;
    let discriminant = &xn * &xn + BigInt::from(4) * &xy * k2;
    let root = discriminant.sqrt();
    let numerator = xn + root;
    let denominator = BigInt::from(2) * xy;
    let x_f = mul_w(x, &numerator, &denominator);
    (numerator, denominator, k2.clone(), &x_f * &x_f)
}

/// Scaling fraction `f` for the middle segment `(x + m)(y + m) = k`.
fn solve_f_middle(
    x: &BigInt,
    y: &BigInt,
    m: &BigInt,
    k: &BigInt,
) -> (BigInt, BigInt, BigInt, BigInt) {
    let xy = x * y;
    let b = (x + y) * m;
    let discriminant = &b * &b + BigInt::from(4) * &xy * (k - m * m);
    let root = discriminant.sqrt();
    let numerator = root - b;
    let denominator = BigInt::from(2) * xy;
    let x_f = mul_w(x, &numerator, &denominator);
    let x_f_plus_m = x_f + m;
    (numerator, denominator, k.clone(), &x_f_plus_m * &x_f_plus_m)
}

fn mul_w(multiplier: &BigInt, numerator: &BigInt, denominator: &BigInt) -> BigInt {
    multiplier * numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::TypeTag;

    fn coin(symbol: &str, type_str: &str) -> CoinInfo {
        CoinInfo {
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 8,
            token_type: TypeTag::parse(type_str).unwrap(),
        }
    }

    // Stable-pair style params: middle band between (100, 110) and (110, 100),
    // wings y = 10500/x + 5 outside it.
    fn make_params() -> CurveParams {
        CurveParams {
            k: BigInt::from(1100 * 1110),
            k2: BigInt::from(100 * 105),
            xa: BigInt::from(100),
            xb: BigInt::from(110),
            m: BigInt::from(1000),
            n: BigInt::from(5),
        }
    }

    fn make_pool(reserve_x: u64, reserve_y: u64, fee_per_million: u64) -> ObricPool {
        ObricPool {
            x: coin("X", "0x1::x::X"),
            y: coin("Y", "0x1::y::Y"),
            reserve_x: BigInt::from(reserve_x),
            reserve_y: BigInt::from(reserve_y),
            params: make_params(),
            x_deci_mult: BigInt::from(1),
            y_deci_mult: BigInt::from(1),
            swap_fee_per_million: BigInt::from(fee_per_million),
        }
    }

    #[test]
    fn test_middle_band_quote() {
        let pool = make_pool(500_000_000, 500_000_000, 1000);
        let out = pool.amount_out(&BigInt::from(1_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(998_803));
    }

    #[test]
    fn test_balanced_pool_is_symmetric() {
        let pool = make_pool(500_000_000, 500_000_000, 1000);
        let forward = pool.amount_out(&BigInt::from(1_000_000), true).unwrap();
        let backward = pool.amount_out(&BigInt::from(1_000_000), false).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_upper_left_wing_quote() {
        // X-scarce pool sits on the steep wing; output beats the input
        let pool = make_pool(100_000_000, 900_000_000, 1000);
        let out = pool.amount_out(&BigInt::from(2_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(17_344_966));
    }

    #[test]
    fn test_bottom_right_wing_quote() {
        // X-heavy pool: the flat wing pays out well below fair
        let pool = make_pool(900_000_000, 100_000_000, 1000);
        let out = pool.amount_out(&BigInt::from(1_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(112_693));
    }

    #[test]
    fn test_segment_crossing_trade() {
        // Large enough to push the pool out of the middle band mid-trade
        let pool = make_pool(500_000_000, 500_000_000, 1000);
        let out = pool.amount_out(&BigInt::from(50_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(45_360_163));
    }

    #[test]
    fn test_double_crossing_trade() {
        // Walks the upper-left wing, through the middle band, onto the
        // bottom-right wing
        let pool = make_pool(80_000_000, 950_000_000, 1000);
        let out = pool.amount_out(&BigInt::from(300_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(744_513_125));
    }

    #[test]
    fn test_decimal_multipliers_normalize() {
        // Two fewer decimals on X; multipliers make it equivalent to the
        // balanced 1:1 pool
        let mut pool = make_pool(5_000_000, 500_000_000, 1000);
        pool.x_deci_mult = BigInt::from(100);
        let out = pool.amount_out(&BigInt::from(10_000), true).unwrap();
        assert_eq!(out, BigInt::from(998_803));
    }

    #[test]
    fn test_output_monotonic_in_input() {
        // Spans the precision split at 10_000 and the segment crossing
        let pool = make_pool(500_000_000, 500_000_000, 1000);
        let mut previous = BigInt::from(0);
        for input in [1_000u64, 100_000, 1_000_000, 10_000_000, 50_000_000] {
            let out = pool.amount_out(&BigInt::from(input), true).unwrap();
            assert!(out >= previous, "output decreased at input {input}");
            previous = out;
        }
    }

    #[test]
    fn test_small_input_path() {
        // Inputs under the preprocessing threshold keep full precision
        let pool = make_pool(50_000_000, 50_000_000, 0);
        let out = pool.amount_out(&BigInt::from(500), true).unwrap();
        assert_eq!(out, BigInt::from(494));
    }

    #[test]
    fn test_oversized_reserves_downscaled() {
        let pool = make_pool(5_000_000_000, 5_000_000_000, 0);
        let out = pool.amount_out(&BigInt::from(1_000_000), true).unwrap();
        assert_eq!(out, BigInt::from(999_917));
    }

    #[test]
    fn test_negative_input_rejected() {
        let pool = make_pool(1_000_000, 1_000_000, 1000);
        assert_eq!(
            pool.amount_out(&BigInt::from(-1), true).unwrap_err(),
            QuoteError::NegativeInput
        );
    }

    #[test]
    fn test_empty_pool_rejected() {
        let pool = make_pool(0, 1_000_000, 1000);
        assert_eq!(
            pool.amount_out(&BigInt::from(100), true).unwrap_err(),
            QuoteError::InsufficientLiquidity
        );
    }
}

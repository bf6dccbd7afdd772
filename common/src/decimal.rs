//! Exact base-10 arithmetic for user-facing quantities.
//!
//! All nutrition math is required to go through these helpers so values add
//! up and round the same way on every platform. Binary floating point is
//! never involved; [`Decimal`] carries exact scale through sums, scalar
//! multiplications and divisions, and only [`to_fixed`] reduces precision.

use rust_decimal::{Decimal, RoundingStrategy};

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    a + b
}

pub fn multiply(a: Decimal, scalar: Decimal) -> Decimal {
    a * scalar
}

/// Divide `a` by `scalar`.
///
/// `scalar` must be non-zero. Serving sizes are validated positive before any
/// value reaches nutrition math.
pub fn divide(a: Decimal, scalar: Decimal) -> Decimal {
    a / scalar
}

/// Render `value` with exactly `dp` decimal places.
///
/// Rounds half away from zero, then pads the scale so `7` renders as `"7.0"`
/// at one decimal place.
pub fn to_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

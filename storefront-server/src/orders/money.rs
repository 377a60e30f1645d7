//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic runs on `Decimal`; values are converted to `f64`
//! only for storage and serialization, rounded to 2 decimal places half-up.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places)
pub const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite inputs never come from the catalog, but a forged request
/// could carry them; default to zero rather than corrupt a total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, half-up
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value)
        .to_f64()
        .expect("Decimal rounded to 2dp is always representable as f64")
}

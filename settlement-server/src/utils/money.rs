//! Money calculation utilities using rust_decimal for precision
//!
//! Sums are done in `Decimal`, then converted to `f64` for storage.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; non-finite values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum f64 amounts without accumulating float error
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(to_decimal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_is_exact() {
        let total = sum([0.1, 0.2, 0.3]);
        assert_eq!(to_f64(total), 0.6);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
    }
}

//! Tiered Rule Evaluator
//!
//! Turns a distance (or duration) into a price from an ordered list of flat
//! bands plus a per-km overflow. Every band contributes its flat price once
//! while any value is left to consume, whether or not the remaining value falls
//! inside that band.

use rust_decimal::prelude::*;
use shared::models::PriceBand;

use crate::utils::money::{to_decimal, to_f64};

/// Surcharge for the fractional km left after the overflow whole kms
fn fraction_surcharge(fraction: Decimal) -> Decimal {
    let quarter = Decimal::new(25, 2);
    let half = Decimal::new(5, 1);

    if fraction <= Decimal::ZERO || fraction >= Decimal::ONE {
        Decimal::ZERO
    } else if fraction < quarter {
        Decimal::from(500)
    } else if fraction < half {
        Decimal::from(1000)
    } else {
        Decimal::from(1500)
    }
}

/// Price `value` against `rules`
///
/// Negative and non-finite values price at 0. A missing `price_per_km`
/// counts as 0.
pub fn evaluate(rules: &[PriceBand], price_per_km: Option<f64>, value: f64) -> f64 {
    to_f64(evaluate_decimal(rules, price_per_km, value))
}

pub fn evaluate_decimal(rules: &[PriceBand], price_per_km: Option<f64>, value: f64) -> Decimal {
    if !value.is_finite() || value <= 0.0 {
        return Decimal::ZERO;
    }

    let mut remaining = to_decimal(value);
    let mut total = Decimal::ZERO;

    for rule in rules {
        if remaining > Decimal::ZERO {
            remaining -= to_decimal(rule.to) - to_decimal(rule.from);
            total += to_decimal(rule.price);
        }
    }

    if remaining > Decimal::ZERO {
        let whole = remaining.floor();
        let per_km = price_per_km.map(to_decimal).unwrap_or(Decimal::ZERO);
        total += whole * per_km + fraction_surcharge(remaining - whole);
    }

    total.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(from: f64, to: f64, price: f64) -> PriceBand {
        PriceBand { from, to, price }
    }

    fn two_bands() -> Vec<PriceBand> {
        vec![band(0.0, 2.0, 5000.0), band(2.0, 5.0, 8000.0)]
    }

    #[test]
    fn test_overflow_with_fraction_band() {
        // 6.4 - 2 - 3 = 1.4 → 2000 + 1000 on top of both flat prices
        assert_eq!(evaluate(&two_bands(), Some(2000.0), 6.4), 16000.0);
    }

    #[test]
    fn test_every_band_contributes_while_value_remains() {
        // 0.5 km goes negative inside the first band
        assert_eq!(evaluate(&two_bands(), Some(2000.0), 0.5), 5000.0);
        // 2.1 km leaves 0.1 after the first band, so the second charges too
        assert_eq!(evaluate(&two_bands(), Some(2000.0), 2.1), 13000.0);
    }

    #[test]
    fn test_fraction_surcharges() {
        let rules = two_bands();
        assert_eq!(evaluate(&rules, Some(2000.0), 5.1), 13500.0);
        assert_eq!(evaluate(&rules, Some(2000.0), 5.25), 14000.0);
        assert_eq!(evaluate(&rules, Some(2000.0), 5.5), 14500.0);
        assert_eq!(evaluate(&rules, Some(2000.0), 6.0), 15000.0);
    }

    #[test]
    fn test_empty_rules_is_overflow_only() {
        assert_eq!(evaluate(&[], Some(1000.0), 3.0), 3000.0);
        assert_eq!(evaluate(&[], None, 3.0), 0.0);
        assert_eq!(evaluate(&[], None, 3.3), 1000.0);
    }

    #[test]
    fn test_non_positive_and_non_finite_values() {
        assert_eq!(evaluate(&two_bands(), Some(2000.0), 0.0), 0.0);
        assert_eq!(evaluate(&two_bands(), Some(2000.0), -4.0), 0.0);
        assert_eq!(evaluate(&two_bands(), Some(2000.0), f64::NAN), 0.0);
    }

    #[test]
    fn test_monotone_when_per_km_covers_largest_surcharge() {
        let rules = two_bands();
        let mut last = 0.0;
        for step in 0..=2000 {
            let value = f64::from(step) * 0.01;
            let price = evaluate(&rules, Some(2000.0), value);
            assert!(price >= last, "price dropped at {value}: {price} < {last}");
            last = price;
        }
    }
}

//! Pricing
//!
//! - [`tiered`] - distance bands + per-km overflow evaluator
//! - [`matcher`] - which rule set applies to a courier's order

pub mod matcher;
pub mod tiered;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{Courier, Order, PricingRuleSet};

use crate::utils::money::to_decimal;

/// Active rule sets of every kind for one organization
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    pub delivery: Vec<PricingRuleSet>,
    pub order_bonus: Vec<PricingRuleSet>,
    pub constructed_bonus: Vec<PricingRuleSet>,
}

/// Price and bonus for one finished order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderQuote {
    pub delivery_price: Decimal,
    pub bonus: Decimal,
}

impl RuleBook {
    /// Quote one order
    ///
    /// The stored delivery price is kept unless it is missing or `recompute`
    /// is set; without a matching delivery rule set a missing price is 0.
    pub fn quote(&self, courier: &Courier, order: &Order, recompute: bool, tz: Tz) -> OrderQuote {
        let price_with = |sets: &[PricingRuleSet]| {
            matcher::select(sets, courier, order.organization_id, order.created_at, tz)
                .map(|set| tiered::evaluate_decimal(&set.rules, set.price_per_km, order.distance))
        };

        let delivery_price = match order.delivery_price {
            Some(stored) if !recompute => to_decimal(stored),
            _ => price_with(&self.delivery).unwrap_or(Decimal::ZERO),
        };

        let bonus = price_with(&self.order_bonus).unwrap_or(Decimal::ZERO)
            + price_with(&self.constructed_bonus).unwrap_or(Decimal::ZERO);

        OrderQuote {
            delivery_price,
            bonus,
        }
    }
}

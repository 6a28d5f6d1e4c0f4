//! Pricing Rule Set Model (delivery / bonus tariffs)

use serde::{Deserialize, Serialize};

use super::{DriveType, text_enum};

text_enum! {
    /// Which tariff table a rule set belongs to
    PricingKind {
        Delivery => "delivery",
        OrderBonus => "order_bonus",
        ConstructedBonus => "constructed_bonus",
    }
}

/// One distance band: flat `price` for the `[from, to]` span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub from: f64,
    pub to: f64,
    pub price: f64,
}

/// Pricing rule set entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PricingRuleSet {
    pub id: i64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub kind: PricingKind,
    pub name: String,
    pub organization_id: i64,
    /// Terminal subset (JSON array; empty = every terminal of the organization)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub terminal_ids: Vec<i64>,
    /// Restrict to a single courier
    pub courier_id: Option<i64>,
    /// Restrict to couriers with this drive type (TEXT, None = any)
    pub drive_type: Option<String>,
    /// Active days of week (JSON array: 0=Sunday..6=Saturday)
    #[cfg_attr(feature = "db", sqlx(json(nullable)))]
    pub active_days: Option<Vec<u8>>,
    /// Active start time (HH:MM format)
    pub start_time: Option<String>,
    /// Active end time (HH:MM format)
    pub end_time: Option<String>,
    /// Ordered distance bands (JSON array)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub rules: Vec<PriceBand>,
    /// Overflow price per km beyond the last band
    pub price_per_km: Option<f64>,
    pub is_active: bool,
}

impl PricingRuleSet {
    /// Parsed drive type restriction; an unparseable value matches nobody
    pub fn drive_type_scope(&self) -> Option<Result<DriveType, super::ParseEnumError>> {
        self.drive_type.as_deref().map(str::parse)
    }
}

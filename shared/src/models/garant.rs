//! Daily Guarantee Tariff Model

use serde::{Deserialize, Serialize};

/// Daily guarantee ("garant") tariff
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GarantTariff {
    pub id: i64,
    pub name: String,
    /// Guaranteed pay per garant day
    pub amount: f64,
    /// Penalty per late clock-in
    pub late_minus_sum: f64,
    /// Garant day boundary (HH:MM)
    pub date: String,
}

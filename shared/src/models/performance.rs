//! Courier Performance Model (monthly ranking row)

use serde::{Deserialize, Serialize};

/// Derived per-courier, per-period ranking row
///
/// Replaced wholesale on every run (delete-then-insert on `courier_id, period_start`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CourierPerformance {
    pub courier_id: i64,
    /// Period start (Unix millis), also the row's `created_at`
    pub period_start: i64,
    /// Average customer score
    pub rating: f64,
    pub delivery_count: i64,
    /// Average delivery time (minutes)
    pub delivery_average_time: f64,
    /// 1-based position inside the cohort
    pub position: i32,
    pub total_active_couriers: i32,
    /// Cohort terminal ids (JSON array, sorted)
    pub terminal_keys: String,
}

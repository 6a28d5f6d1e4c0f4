//! Courier Settlement Model (monthly guarantee/bonus payout row)

use serde::{Deserialize, Serialize};

/// Computed settlement for one courier and one period
///
/// Replaced wholesale on every run (delete-then-insert on `courier_id, period_start`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CourierSettlement {
    pub courier_id: i64,
    /// Period start (Unix millis)
    pub period_start: i64,
    /// Period end (Unix millis, inclusive)
    pub period_end: i64,
    pub orders_count: i64,
    pub delivery_price: f64,
    pub bonus_total: f64,
    /// delivery_price + bonus_total
    pub earned: f64,
    pub garant_days: i32,
    pub possible_day_offs: i32,
    pub actual_day_offs: i32,
    pub late_count: i32,
    pub garant_price: f64,
    pub possible_garant_price: f64,
    /// Guarantee owed on top of earnings
    pub garant_top_up: f64,
    pub balance_to_pay: f64,
    pub rating: f64,
    pub position: i32,
    pub total_active_couriers: i32,
    /// Unix millis
    pub created_at: i64,
}

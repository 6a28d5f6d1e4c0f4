//! Order Model

use serde::{Deserialize, Serialize};

/// Order status reference row (per organization)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderStatus {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub cancel: bool,
    pub finish: bool,
    pub waiting: bool,
}

/// Delivery order
///
/// Immutable once finalized, apart from `order_status_id` and `finished_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub courier_id: i64,
    pub terminal_id: i64,
    pub organization_id: i64,
    pub order_status_id: i64,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis, None while the order is in progress
    pub finished_date: Option<i64>,
    /// Customer rating of the courier
    pub score: Option<i32>,
    /// Delivery distance (km)
    #[serde(default)]
    pub distance: f64,
    /// Stored delivery price, None when it was never priced
    pub delivery_price: Option<f64>,
}

impl Order {
    pub fn is_finished(&self) -> bool {
        self.finished_date.is_some()
    }

    /// Delivery duration in minutes, None for unfinished orders
    pub fn delivery_minutes(&self) -> Option<f64> {
        self.finished_date
            .map(|finished| crate::util::minutes_between(self.created_at, finished))
    }
}

/// Order selection used by the aggregation reads
///
/// The window is inclusive on both ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub courier_id: i64,
    pub terminal_ids: Vec<i64>,
    pub start: i64,
    pub end: i64,
    /// Allowed `order_status_id` values (the non-cancelled whitelist)
    pub status_ids: Vec<i64>,
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        order.courier_id == self.courier_id
            && self.terminal_ids.contains(&order.terminal_id)
            && order.created_at >= self.start
            && order.created_at <= self.end
            && self.status_ids.contains(&order.order_status_id)
    }
}

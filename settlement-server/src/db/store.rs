//! Data-access interface for the settlement engine
//!
//! Everything the batches read or write goes through [`SettlementStore`], so
//! the engine never touches a connection pool or a global client directly.

use async_trait::async_trait;
use shared::models::{
    BalanceTotals, Courier, CourierFilter, CourierPerformance, CourierSettlement, GarantTariff,
    Order, OrderQuery, OrderStatus, PricingKind, PricingRuleSet, Terminal, WorkScheduleEntry,
};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Connectivity check, run once before a batch starts
    async fn ping(&self) -> StoreResult<()>;

    // ── Couriers & terminals ──

    async fn find_couriers(&self, filter: &CourierFilter) -> StoreResult<Vec<Courier>>;
    async fn find_terminal(&self, id: i64) -> StoreResult<Option<Terminal>>;
    /// Terminals whose `linked_terminal_id` equals `hub_id`
    async fn find_terminals_linked_to(&self, hub_id: i64) -> StoreResult<Vec<Terminal>>;
    async fn set_courier_online(&self, courier_id: i64, is_online: bool) -> StoreResult<()>;

    // ── Orders ──

    async fn find_order_statuses(&self) -> StoreResult<Vec<OrderStatus>>;
    async fn count_orders(&self, query: &OrderQuery) -> StoreResult<i64>;
    /// Mean score of finished orders (null score = 0), 0 when none
    async fn average_score(&self, query: &OrderQuery) -> StoreResult<f64>;
    async fn finished_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>>;

    // ── Attendance ──

    /// Open entries that started before `before`
    async fn find_open_work_entries(&self, before: i64) -> StoreResult<Vec<WorkScheduleEntry>>;
    /// Entries of one courier started inside `[start, end]`
    async fn find_work_entries(
        &self,
        courier_id: i64,
        start: i64,
        end: i64,
    ) -> StoreResult<Vec<WorkScheduleEntry>>;
    /// Close an open entry; false when it was already closed
    async fn close_work_entry(
        &self,
        id: i64,
        date_finish: i64,
        duration: i64,
    ) -> StoreResult<bool>;

    // ── Tariffs & wallet ──

    /// Active rule sets of one kind for an organization
    async fn find_pricing_rule_sets(
        &self,
        organization_id: i64,
        kind: PricingKind,
    ) -> StoreResult<Vec<PricingRuleSet>>;
    async fn find_garant_tariff(&self, id: i64) -> StoreResult<Option<GarantTariff>>;
    /// Wallet sums for transactions created up to `until`
    async fn balance_totals(&self, courier_id: i64, until: i64) -> StoreResult<BalanceTotals>;

    // ── Derived rows ──

    /// Delete-then-insert on `(courier_id, period_start)`
    async fn replace_performance(&self, row: &CourierPerformance) -> StoreResult<()>;
    async fn list_performance(&self, period_start: i64) -> StoreResult<Vec<CourierPerformance>>;
    /// Delete-then-insert on `(courier_id, period_start)`
    async fn replace_settlement(&self, row: &CourierSettlement) -> StoreResult<()>;
    async fn list_settlements(&self, period_start: i64) -> StoreResult<Vec<CourierSettlement>>;
}

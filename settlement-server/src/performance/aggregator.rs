//! Period Aggregator
//!
//! Delivery count, average score and average delivery time of one courier
//! over a terminal group and an inclusive time window. The three reads are
//! independent and run concurrently.

use shared::models::{Order, OrderQuery};

use super::TerminalGroup;
use crate::core::TimeWindow;
use crate::db::{SettlementStore, StoreResult};

/// Raw period metrics of one courier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodMetrics {
    pub delivery_count: i64,
    pub average_score: f64,
    /// Minutes, 0 without finished orders
    pub average_delivery_time: f64,
    pub finished_orders: Vec<Order>,
}

impl PeriodMetrics {
    pub fn has_finished_orders(&self) -> bool {
        !self.finished_orders.is_empty()
    }
}

/// Mean delivery time in minutes over finished orders, 0 when there are none
pub fn average_delivery_minutes(orders: &[Order]) -> f64 {
    let minutes: Vec<f64> = orders.iter().filter_map(Order::delivery_minutes).collect();
    if minutes.is_empty() {
        return 0.0;
    }
    minutes.iter().sum::<f64>() / minutes.len() as f64
}

pub struct Aggregator<'a> {
    store: &'a dyn SettlementStore,
    /// Non-cancelled order statuses, fetched once per run
    status_ids: Vec<i64>,
}

impl<'a> Aggregator<'a> {
    pub async fn new(store: &'a dyn SettlementStore) -> StoreResult<Self> {
        let status_ids: Vec<i64> = store
            .find_order_statuses()
            .await?
            .into_iter()
            .filter(|s| !s.cancel)
            .map(|s| s.id)
            .collect();
        tracing::debug!(statuses = status_ids.len(), "Loaded non-cancelled order statuses");
        Ok(Self { store, status_ids })
    }

    pub fn query(&self, courier_id: i64, group: &TerminalGroup, window: TimeWindow) -> OrderQuery {
        OrderQuery {
            courier_id,
            terminal_ids: group.ids(),
            start: window.start,
            end: window.end,
            status_ids: self.status_ids.clone(),
        }
    }

    pub async fn aggregate(
        &self,
        courier_id: i64,
        group: &TerminalGroup,
        window: TimeWindow,
    ) -> StoreResult<PeriodMetrics> {
        let query = self.query(courier_id, group, window);

        let (delivery_count, average_score, finished_orders) = tokio::try_join!(
            self.store.count_orders(&query),
            self.store.average_score(&query),
            self.store.finished_orders(&query),
        )?;

        Ok(PeriodMetrics {
            delivery_count,
            average_score: if average_score.is_finite() { average_score } else { 0.0 },
            average_delivery_time: average_delivery_minutes(&finished_orders),
            finished_orders,
        })
    }

    /// Finished orders of one courier in an arbitrary window
    pub async fn finished_orders(
        &self,
        courier_id: i64,
        group: &TerminalGroup,
        window: TimeWindow,
    ) -> StoreResult<Vec<Order>> {
        let query = self.query(courier_id, group, window);
        self.store.finished_orders(&query).await
    }
}

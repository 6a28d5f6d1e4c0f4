//! Postgres-backed [`SettlementStore`]

use async_trait::async_trait;
use shared::models::{
    BalanceTotals, Courier, CourierFilter, CourierPerformance, CourierSettlement, GarantTariff,
    Order, OrderQuery, OrderStatus, PricingKind, PricingRuleSet, Terminal, WorkScheduleEntry,
};
use sqlx::PgPool;

use super::repository::{
    courier, garant, order, performance, pricing, settlement, terminal, transaction,
    work_schedule,
};
use super::{SettlementStore, StoreResult};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettlementStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_couriers(&self, filter: &CourierFilter) -> StoreResult<Vec<Courier>> {
        courier::find_by_filter(&self.pool, filter).await
    }

    async fn find_terminal(&self, id: i64) -> StoreResult<Option<Terminal>> {
        terminal::find_by_id(&self.pool, id).await
    }

    async fn find_terminals_linked_to(&self, hub_id: i64) -> StoreResult<Vec<Terminal>> {
        terminal::find_linked_to(&self.pool, hub_id).await
    }

    async fn set_courier_online(&self, courier_id: i64, is_online: bool) -> StoreResult<()> {
        courier::set_online(&self.pool, courier_id, is_online).await
    }

    async fn find_order_statuses(&self) -> StoreResult<Vec<OrderStatus>> {
        order::find_statuses(&self.pool).await
    }

    async fn count_orders(&self, query: &OrderQuery) -> StoreResult<i64> {
        order::count(&self.pool, query).await
    }

    async fn average_score(&self, query: &OrderQuery) -> StoreResult<f64> {
        order::average_score(&self.pool, query).await
    }

    async fn finished_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>> {
        order::find_finished(&self.pool, query).await
    }

    async fn find_open_work_entries(&self, before: i64) -> StoreResult<Vec<WorkScheduleEntry>> {
        work_schedule::find_open_before(&self.pool, before).await
    }

    async fn find_work_entries(
        &self,
        courier_id: i64,
        start: i64,
        end: i64,
    ) -> StoreResult<Vec<WorkScheduleEntry>> {
        work_schedule::find_by_courier(&self.pool, courier_id, start, end).await
    }

    async fn close_work_entry(
        &self,
        id: i64,
        date_finish: i64,
        duration: i64,
    ) -> StoreResult<bool> {
        work_schedule::close(&self.pool, id, date_finish, duration).await
    }

    async fn find_pricing_rule_sets(
        &self,
        organization_id: i64,
        kind: PricingKind,
    ) -> StoreResult<Vec<PricingRuleSet>> {
        pricing::find_active(&self.pool, organization_id, kind).await
    }

    async fn find_garant_tariff(&self, id: i64) -> StoreResult<Option<GarantTariff>> {
        garant::find_by_id(&self.pool, id).await
    }

    async fn balance_totals(&self, courier_id: i64, until: i64) -> StoreResult<BalanceTotals> {
        transaction::totals(&self.pool, courier_id, until).await
    }

    async fn replace_performance(&self, row: &CourierPerformance) -> StoreResult<()> {
        performance::replace(&self.pool, row).await
    }

    async fn list_performance(&self, period_start: i64) -> StoreResult<Vec<CourierPerformance>> {
        performance::find_by_period(&self.pool, period_start).await
    }

    async fn replace_settlement(&self, row: &CourierSettlement) -> StoreResult<()> {
        settlement::replace(&self.pool, row).await
    }

    async fn list_settlements(&self, period_start: i64) -> StoreResult<Vec<CourierSettlement>> {
        settlement::find_by_period(&self.pool, period_start).await
    }
}

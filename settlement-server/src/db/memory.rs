//! In-process [`SettlementStore`]
//!
//! Backs the integration tests and dry runs. Tables are plain `Vec`s behind a
//! `parking_lot::RwLock`; every read applies the same filters as the SQL in
//! [`repository`](super::repository).

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    BalanceTotals, BalanceTransaction, Courier, CourierFilter, CourierPerformance,
    CourierSettlement, GarantTariff, Order, OrderQuery, OrderStatus, PricingKind, PricingRuleSet,
    Terminal, TransactionKind, TransactionStatus, WorkScheduleEntry, WorkStatus,
};

use super::{SettlementStore, StoreError, StoreResult};
use crate::utils::money;

#[derive(Debug, Default)]
struct Tables {
    couriers: Vec<Courier>,
    terminals: Vec<Terminal>,
    order_statuses: Vec<OrderStatus>,
    orders: Vec<Order>,
    work_entries: Vec<WorkScheduleEntry>,
    rule_sets: Vec<PricingRuleSet>,
    tariffs: Vec<GarantTariff>,
    transactions: Vec<BalanceTransaction>,
    performance: Vec<CourierPerformance>,
    settlements: Vec<CourierSettlement>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_courier(&self, courier: Courier) {
        self.tables.write().couriers.push(courier);
    }

    pub fn insert_terminal(&self, terminal: Terminal) {
        self.tables.write().terminals.push(terminal);
    }

    pub fn insert_order_status(&self, status: OrderStatus) {
        self.tables.write().order_statuses.push(status);
    }

    pub fn insert_order(&self, order: Order) {
        self.tables.write().orders.push(order);
    }

    pub fn insert_work_entry(&self, entry: WorkScheduleEntry) {
        self.tables.write().work_entries.push(entry);
    }

    pub fn insert_rule_set(&self, rule_set: PricingRuleSet) {
        self.tables.write().rule_sets.push(rule_set);
    }

    pub fn insert_tariff(&self, tariff: GarantTariff) {
        self.tables.write().tariffs.push(tariff);
    }

    pub fn insert_transaction(&self, transaction: BalanceTransaction) {
        self.tables.write().transactions.push(transaction);
    }

    /// Snapshot of one courier row
    pub fn courier(&self, id: i64) -> Option<Courier> {
        self.tables.read().couriers.iter().find(|c| c.id == id).cloned()
    }

    /// Snapshot of one work entry
    pub fn work_entry(&self, id: i64) -> Option<WorkScheduleEntry> {
        self.tables.read().work_entries.iter().find(|e| e.id == id).cloned()
    }

    fn matching_finished(&self, query: &OrderQuery) -> Vec<Order> {
        let tables = self.tables.read();
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| query.matches(o) && o.is_finished())
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }
}

#[async_trait]
impl SettlementStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_couriers(&self, filter: &CourierFilter) -> StoreResult<Vec<Courier>> {
        let mut couriers: Vec<Courier> = self
            .tables
            .read()
            .couriers
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        couriers.sort_by_key(|c| c.id);
        Ok(couriers)
    }

    async fn find_terminal(&self, id: i64) -> StoreResult<Option<Terminal>> {
        Ok(self.tables.read().terminals.iter().find(|t| t.id == id).cloned())
    }

    async fn find_terminals_linked_to(&self, hub_id: i64) -> StoreResult<Vec<Terminal>> {
        let mut terminals: Vec<Terminal> = self
            .tables
            .read()
            .terminals
            .iter()
            .filter(|t| t.linked_terminal_id == Some(hub_id))
            .cloned()
            .collect();
        terminals.sort_by_key(|t| t.id);
        Ok(terminals)
    }

    async fn set_courier_online(&self, courier_id: i64, is_online: bool) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let courier = tables
            .couriers
            .iter_mut()
            .find(|c| c.id == courier_id)
            .ok_or_else(|| StoreError::NotFound(format!("Courier {courier_id}")))?;
        courier.is_online = is_online;
        Ok(())
    }

    async fn find_order_statuses(&self) -> StoreResult<Vec<OrderStatus>> {
        Ok(self.tables.read().order_statuses.clone())
    }

    async fn count_orders(&self, query: &OrderQuery) -> StoreResult<i64> {
        let count = self
            .tables
            .read()
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .count();
        Ok(count as i64)
    }

    async fn average_score(&self, query: &OrderQuery) -> StoreResult<f64> {
        let orders = self.matching_finished(query);
        if orders.is_empty() {
            return Ok(0.0);
        }
        let total: i64 = orders.iter().map(|o| i64::from(o.score.unwrap_or(0))).sum();
        Ok(total as f64 / orders.len() as f64)
    }

    async fn finished_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>> {
        Ok(self.matching_finished(query))
    }

    async fn find_open_work_entries(&self, before: i64) -> StoreResult<Vec<WorkScheduleEntry>> {
        let mut entries: Vec<WorkScheduleEntry> = self
            .tables
            .read()
            .work_entries
            .iter()
            .filter(|e| e.is_open() && e.date_start < before)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date_start);
        Ok(entries)
    }

    async fn find_work_entries(
        &self,
        courier_id: i64,
        start: i64,
        end: i64,
    ) -> StoreResult<Vec<WorkScheduleEntry>> {
        let mut entries: Vec<WorkScheduleEntry> = self
            .tables
            .read()
            .work_entries
            .iter()
            .filter(|e| e.courier_id == courier_id && e.date_start >= start && e.date_start <= end)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date_start);
        Ok(entries)
    }

    async fn close_work_entry(
        &self,
        id: i64,
        date_finish: i64,
        duration: i64,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        match tables.work_entries.iter_mut().find(|e| e.id == id && e.is_open()) {
            Some(entry) => {
                entry.current_status = WorkStatus::Closed;
                entry.date_finish = Some(date_finish);
                entry.duration = Some(duration);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_pricing_rule_sets(
        &self,
        organization_id: i64,
        kind: PricingKind,
    ) -> StoreResult<Vec<PricingRuleSet>> {
        let mut sets: Vec<PricingRuleSet> = self
            .tables
            .read()
            .rule_sets
            .iter()
            .filter(|s| s.organization_id == organization_id && s.kind == kind && s.is_active)
            .cloned()
            .collect();
        sets.sort_by_key(|s| s.id);
        Ok(sets)
    }

    async fn find_garant_tariff(&self, id: i64) -> StoreResult<Option<GarantTariff>> {
        Ok(self.tables.read().tariffs.iter().find(|t| t.id == id).cloned())
    }

    async fn balance_totals(&self, courier_id: i64, until: i64) -> StoreResult<BalanceTotals> {
        let tables = self.tables.read();
        let mine = || {
            tables
                .transactions
                .iter()
                .filter(move |t| t.courier_id == courier_id && t.created_at <= until)
        };
        let credited = money::sum(
            mine()
                .filter(|t| t.kind == TransactionKind::Credit)
                .map(|t| t.amount),
        );
        let withdrawn = money::sum(
            mine()
                .filter(|t| {
                    t.kind == TransactionKind::Withdrawal && t.status == TransactionStatus::Success
                })
                .map(|t| t.amount),
        );
        Ok(BalanceTotals {
            credited: money::to_f64(credited),
            withdrawn: money::to_f64(withdrawn),
        })
    }

    async fn replace_performance(&self, row: &CourierPerformance) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables
            .performance
            .retain(|p| !(p.courier_id == row.courier_id && p.period_start == row.period_start));
        tables.performance.push(row.clone());
        Ok(())
    }

    async fn list_performance(&self, period_start: i64) -> StoreResult<Vec<CourierPerformance>> {
        let mut rows: Vec<CourierPerformance> = self
            .tables
            .read()
            .performance
            .iter()
            .filter(|p| p.period_start == period_start)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.courier_id);
        Ok(rows)
    }

    async fn replace_settlement(&self, row: &CourierSettlement) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables
            .settlements
            .retain(|s| !(s.courier_id == row.courier_id && s.period_start == row.period_start));
        tables.settlements.push(row.clone());
        Ok(())
    }

    async fn list_settlements(&self, period_start: i64) -> StoreResult<Vec<CourierSettlement>> {
        let mut rows: Vec<CourierSettlement> = self
            .tables
            .read()
            .settlements
            .iter()
            .filter(|s| s.period_start == period_start)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.courier_id);
        Ok(rows)
    }
}

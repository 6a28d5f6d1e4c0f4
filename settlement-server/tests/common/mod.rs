#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use parking_lot::Mutex;
use settlement_server::cache::{LocationCache, MemoryLocationCache};
use settlement_server::db::{MemoryStore, SettlementStore, StoreError, StoreResult};
use settlement_server::utils::time;
use settlement_server::{Config, JobContext};
use shared::models::{
    BalanceTotals, Courier, CourierFilter, CourierPerformance, CourierSettlement, CourierStatus,
    DriveType, GarantTariff, Order, OrderQuery, OrderStatus, PricingKind, PricingRuleSet,
    Terminal, WorkScheduleEntry, WorkStatus,
};

pub const TZ: Tz = chrono_tz::Asia::Tashkent;

pub const DELIVERED: i64 = 1;
pub const CANCELLED: i64 = 2;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, min: u32) -> i64 {
    time::date_hms_to_millis(day, hour, min, 0, TZ)
}

pub fn config() -> Config {
    Config::with_overrides(TZ, "00:00")
}

pub fn context(store: Arc<dyn SettlementStore>, config: Config) -> (JobContext, Arc<MemoryLocationCache>) {
    let cache = Arc::new(MemoryLocationCache::new());
    let ctx = JobContext::new(store, cache.clone() as Arc<dyn LocationCache>, config);
    (ctx, cache)
}

pub fn courier(id: i64, terminal_id: i64) -> Courier {
    Courier {
        id,
        name: format!("Courier {id}"),
        status: CourierStatus::Active,
        drive_type: DriveType::Scooter,
        terminal_id,
        daily_garant_id: None,
        order_start_date: None,
        is_online: true,
    }
}

pub fn terminal(id: i64, linked_terminal_id: Option<i64>) -> Terminal {
    Terminal {
        id,
        name: format!("Terminal {id}"),
        organization_id: 1,
        linked_terminal_id,
    }
}

pub fn tariff(id: i64, date: &str) -> GarantTariff {
    GarantTariff {
        id,
        name: "Daily garant".into(),
        amount: 100_000.0,
        late_minus_sum: 20_000.0,
        date: date.into(),
    }
}

/// Delivered order finished `minutes` after `created_at`
pub fn order(id: i64, courier_id: i64, terminal_id: i64, created_at: i64, minutes: i64) -> Order {
    Order {
        id,
        courier_id,
        terminal_id,
        organization_id: 1,
        order_status_id: DELIVERED,
        created_at,
        finished_date: Some(created_at + minutes * 60_000),
        score: Some(5),
        distance: 1.0,
        delivery_price: Some(10_000.0),
    }
}

pub fn work_entry(id: i64, courier_id: i64, date_start: i64, late: bool) -> WorkScheduleEntry {
    WorkScheduleEntry {
        id,
        courier_id,
        terminal_id: 1,
        date_start,
        date_finish: None,
        current_status: WorkStatus::Open,
        duration: None,
        late,
    }
}

/// Hub 1 with spoke 2, standalone 3; delivered + cancelled statuses
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_terminal(terminal(1, None));
    store.insert_terminal(terminal(2, Some(1)));
    store.insert_terminal(terminal(3, None));
    for (id, cancel) in [(DELIVERED, false), (CANCELLED, true)] {
        store.insert_order_status(OrderStatus {
            id,
            organization_id: 1,
            name: if cancel { "Cancelled" } else { "Delivered" }.into(),
            cancel,
            finish: !cancel,
            waiting: false,
        });
    }
    store
}

/// Delegates to a `MemoryStore`, but misbehaves for `courier_id`, and logs
/// every write in call order
pub struct FlakyStore {
    pub inner: MemoryStore,
    /// Order counts for this courier fail, or hang with `hang`
    pub courier_id: i64,
    pub hang: bool,
    /// Every ping fails
    pub down: bool,
    pub writes: Mutex<Vec<&'static str>>,
}

impl FlakyStore {
    pub fn wrap(inner: MemoryStore) -> Self {
        Self {
            inner,
            courier_id: 0,
            hang: false,
            down: false,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<&'static str> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl SettlementStore for FlakyStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.down {
            return Err(StoreError::Database("connection refused".into()));
        }
        self.inner.ping().await
    }
    async fn find_couriers(&self, filter: &CourierFilter) -> StoreResult<Vec<Courier>> {
        self.inner.find_couriers(filter).await
    }
    async fn find_terminal(&self, id: i64) -> StoreResult<Option<Terminal>> {
        self.inner.find_terminal(id).await
    }
    async fn find_terminals_linked_to(&self, hub_id: i64) -> StoreResult<Vec<Terminal>> {
        self.inner.find_terminals_linked_to(hub_id).await
    }
    async fn set_courier_online(&self, courier_id: i64, is_online: bool) -> StoreResult<()> {
        self.inner.set_courier_online(courier_id, is_online).await
    }
    async fn find_order_statuses(&self) -> StoreResult<Vec<OrderStatus>> {
        self.inner.find_order_statuses().await
    }
    async fn count_orders(&self, query: &OrderQuery) -> StoreResult<i64> {
        if query.courier_id == self.courier_id {
            if self.hang {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            } else {
                return Err(StoreError::Database("connection reset".into()));
            }
        }
        self.inner.count_orders(query).await
    }
    async fn average_score(&self, query: &OrderQuery) -> StoreResult<f64> {
        self.inner.average_score(query).await
    }
    async fn finished_orders(&self, query: &OrderQuery) -> StoreResult<Vec<Order>> {
        self.inner.finished_orders(query).await
    }
    async fn find_open_work_entries(&self, before: i64) -> StoreResult<Vec<WorkScheduleEntry>> {
        self.inner.find_open_work_entries(before).await
    }
    async fn find_work_entries(&self, courier_id: i64, start: i64, end: i64) -> StoreResult<Vec<WorkScheduleEntry>> {
        self.inner.find_work_entries(courier_id, start, end).await
    }
    async fn close_work_entry(&self, id: i64, date_finish: i64, duration: i64) -> StoreResult<bool> {
        self.writes.lock().push("close_work_entry");
        self.inner.close_work_entry(id, date_finish, duration).await
    }
    async fn find_pricing_rule_sets(&self, organization_id: i64, kind: PricingKind) -> StoreResult<Vec<PricingRuleSet>> {
        self.inner.find_pricing_rule_sets(organization_id, kind).await
    }
    async fn find_garant_tariff(&self, id: i64) -> StoreResult<Option<GarantTariff>> {
        self.inner.find_garant_tariff(id).await
    }
    async fn balance_totals(&self, courier_id: i64, until: i64) -> StoreResult<BalanceTotals> {
        self.inner.balance_totals(courier_id, until).await
    }
    async fn replace_performance(&self, row: &CourierPerformance) -> StoreResult<()> {
        self.writes.lock().push("replace_performance");
        self.inner.replace_performance(row).await
    }
    async fn list_performance(&self, period_start: i64) -> StoreResult<Vec<CourierPerformance>> {
        self.inner.list_performance(period_start).await
    }
    async fn replace_settlement(&self, row: &CourierSettlement) -> StoreResult<()> {
        self.writes.lock().push("replace_settlement");
        self.inner.replace_settlement(row).await
    }
    async fn list_settlements(&self, period_start: i64) -> StoreResult<Vec<CourierSettlement>> {
        self.inner.list_settlements(period_start).await
    }
}

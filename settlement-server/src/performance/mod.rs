//! Courier performance
//!
//! - [`terminal_group`] - which terminals rank together
//! - [`aggregator`] - per-courier period metrics
//! - [`ranking`] - cohort ordering
//! - [`job`] - monthly performance batch
//!
//! [`PerformanceRun`] ties the first three together for one time window and
//! memoizes cohort work so every cohort member is aggregated once per group.

pub mod aggregator;
pub mod job;
pub mod ranking;
pub mod terminal_group;

pub use aggregator::{Aggregator, PeriodMetrics};
pub use ranking::{CohortEntry, RankingResult};
pub use terminal_group::{GroupResolver, TerminalGroup};

use std::collections::HashMap;

use shared::models::{Courier, CourierFilter, CourierStatus};

use crate::core::TimeWindow;
use crate::db::{SettlementStore, StoreResult};

/// Group, metrics and rank of one courier
#[derive(Debug, Clone)]
pub struct CourierEvaluation {
    pub group: TerminalGroup,
    pub metrics: PeriodMetrics,
    pub ranking: RankingResult,
}

/// Shared state for evaluating many couriers over one window
pub struct PerformanceRun<'a> {
    store: &'a dyn SettlementStore,
    aggregator: Aggregator<'a>,
    window: TimeWindow,
    groups: GroupResolver,
    cohorts: HashMap<TerminalGroup, Vec<i64>>,
    metrics: HashMap<(i64, TerminalGroup), PeriodMetrics>,
}

impl<'a> PerformanceRun<'a> {
    pub async fn new(store: &'a dyn SettlementStore, window: TimeWindow) -> StoreResult<Self> {
        Ok(Self {
            store,
            aggregator: Aggregator::new(store).await?,
            window,
            groups: GroupResolver::new(),
            cohorts: HashMap::new(),
            metrics: HashMap::new(),
        })
    }

    pub fn aggregator(&self) -> &Aggregator<'a> {
        &self.aggregator
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub async fn evaluate(&mut self, courier: &Courier) -> StoreResult<CourierEvaluation> {
        let group = self.groups.resolve(self.store, courier.terminal_id).await?;
        let metrics = self.metrics_for(courier.id, &group).await?;

        let mut cohort = Vec::new();
        for member_id in self.cohort_of(&group).await? {
            let member = self.metrics_for(member_id, &group).await?;
            cohort.push(CohortEntry::from_metrics(member_id, &member));
        }

        let ranking = ranking::rank(CohortEntry::from_metrics(courier.id, &metrics), &cohort);
        tracing::debug!(
            courier_id = courier.id,
            terminals = %group.keys(),
            position = ranking.position,
            cohort_size = ranking.cohort_size,
            "Courier ranked"
        );

        Ok(CourierEvaluation {
            group,
            metrics,
            ranking,
        })
    }

    async fn metrics_for(&mut self, courier_id: i64, group: &TerminalGroup) -> StoreResult<PeriodMetrics> {
        let key = (courier_id, group.clone());
        if let Some(metrics) = self.metrics.get(&key) {
            return Ok(metrics.clone());
        }
        let metrics = self.aggregator.aggregate(courier_id, group, self.window).await?;
        self.metrics.insert(key, metrics.clone());
        Ok(metrics)
    }

    /// Active couriers assigned to any terminal of the group
    async fn cohort_of(&mut self, group: &TerminalGroup) -> StoreResult<Vec<i64>> {
        if let Some(ids) = self.cohorts.get(group) {
            return Ok(ids.clone());
        }
        let filter = CourierFilter {
            status: Some(CourierStatus::Active),
            terminal_ids: group.ids(),
            with_garant: false,
        };
        let ids: Vec<i64> = self
            .store
            .find_couriers(&filter)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        self.cohorts.insert(group.clone(), ids.clone());
        Ok(ids)
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;

use super::{Config, CourierOutcome, JobError, JobResult};
use crate::cache::LocationCache;
use crate::db::SettlementStore;

/// Everything a batch needs, passed explicitly into each entry point
///
/// Cheap to clone: the store and cache are shared behind `Arc`.
///
/// | Field | Type | Meaning |
/// |------|------|------|
/// | store | Arc<dyn SettlementStore> | Data-access interface |
/// | cache | Arc<dyn LocationCache> | Live courier locations |
/// | config | Config | Immutable settings |
#[derive(Clone)]
pub struct JobContext {
    pub store: Arc<dyn SettlementStore>,
    pub cache: Arc<dyn LocationCache>,
    pub config: Config,
}

impl JobContext {
    pub fn new(
        store: Arc<dyn SettlementStore>,
        cache: Arc<dyn LocationCache>,
        config: Config,
    ) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    pub fn tz(&self) -> Tz {
        self.config.timezone
    }

    pub fn cutoff(&self) -> NaiveTime {
        self.config.cutoff_time()
    }

    /// Run one courier's computation under the per-courier time limit
    ///
    /// Errors and timeouts are logged and turned into a failed outcome so the
    /// caller can move on to the next courier.
    pub async fn run_courier<F>(&self, job: &'static str, courier_id: i64, work: F) -> CourierOutcome
    where
        F: Future<Output = JobResult<CourierOutcome>>,
    {
        let secs = self.config.courier_timeout_secs;
        let result = match tokio::time::timeout(Duration::from_secs(secs), work).await {
            Ok(result) => result,
            Err(_) => Err(JobError::Timeout { courier_id, secs }),
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(job, courier_id, error = %e, "Courier computation failed");
                CourierOutcome::Failed(e.to_string())
            }
        }
    }
}

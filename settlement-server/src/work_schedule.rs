//! Daily work-schedule closer
//!
//! At the business-day cutoff every attendance entry still `open` from a
//! previous business day is force-closed: `date_finish = now`, `duration` in
//! seconds, the courier goes offline and its live location is evicted.
//! Only `open` rows are touched, so running it twice changes nothing.

use serde::Serialize;

use crate::core::{JobContext, JobResult};
use crate::utils::time;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CloseReport {
    /// Entries this run closed
    pub closed: usize,
    /// Entries another writer closed first
    pub already_closed: usize,
    pub failed: usize,
}

pub async fn close_stale_entries(ctx: &JobContext) -> JobResult<CloseReport> {
    close_stale_entries_at(ctx, shared::util::now_millis()).await
}

/// Close entries opened before the business day containing `now`
pub async fn close_stale_entries_at(ctx: &JobContext, now: i64) -> JobResult<CloseReport> {
    let cutoff = ctx.cutoff();
    let tz = ctx.tz();
    let today = time::business_date_at(now, cutoff, tz);
    let business_day_start = time::date_cutoff_millis(today, cutoff, tz);

    let entries = ctx.store.find_open_work_entries(business_day_start).await?;
    if entries.is_empty() {
        tracing::debug!(%today, "No stale work entries");
        return Ok(CloseReport::default());
    }
    tracing::info!(%today, count = entries.len(), "Closing stale work entries");

    let mut report = CloseReport::default();
    for entry in &entries {
        let duration = (now - entry.date_start).max(0) / 1000;
        match ctx.store.close_work_entry(entry.id, now, duration).await {
            Ok(true) => {}
            Ok(false) => {
                report.already_closed += 1;
                continue;
            }
            Err(e) => {
                tracing::error!(entry_id = entry.id, courier_id = entry.courier_id, error = %e, "Failed to close work entry");
                report.failed += 1;
                continue;
            }
        }
        report.closed += 1;

        if let Err(e) = ctx.store.set_courier_online(entry.courier_id, false).await {
            tracing::warn!(courier_id = entry.courier_id, error = %e, "Failed to mark courier offline");
        }
        ctx.cache.evict(entry.courier_id);
        tracing::debug!(entry_id = entry.id, courier_id = entry.courier_id, duration, "Work entry closed");
    }

    tracing::info!(
        closed = report.closed,
        already_closed = report.already_closed,
        failed = report.failed,
        "Stale work entries processed"
    );
    Ok(report)
}

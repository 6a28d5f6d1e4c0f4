//! Daily cutoff scheduler
//!
//! Sleeps until the next business-day cutoff, then:
//! 1. force-closes stale work entries
//! 2. refreshes the performance ranking of the month that just ended a day
//! 3. on the first business day of a month, settles the previous month
//!
//! Spawned on `BackgroundTasks` in `serve` mode.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use super::{JobContext, Period};
use crate::utils::time;
use crate::{performance, settlement, work_schedule};

pub struct DailyScheduler {
    ctx: JobContext,
    shutdown: CancellationToken,
}

impl DailyScheduler {
    pub fn new(ctx: JobContext, shutdown: CancellationToken) -> Self {
        Self { ctx, shutdown }
    }

    /// Main loop: cutoff-driven runs until shutdown
    pub async fn run(self) {
        tracing::info!("Daily scheduler started");

        loop {
            let cutoff = self.ctx.cutoff();
            let sleep_duration = duration_until_next_cutoff(cutoff, self.ctx.tz());

            tracing::info!(
                "Next daily run in {} minutes (cutoff={})",
                sleep_duration.as_secs() / 60,
                cutoff.format("%H:%M")
            );

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    let today = time::current_business_date(cutoff, self.ctx.tz());
                    run_daily(&self.ctx, today).await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Daily scheduler received shutdown signal");
                    return;
                }
            }
        }
    }
}

/// One cutoff's worth of jobs for business day `today`
///
/// Failures are logged; the next cutoff runs regardless.
pub async fn run_daily(ctx: &JobContext, today: NaiveDate) {
    if let Err(e) = work_schedule::close_stale_entries(ctx).await {
        tracing::error!(error = %e, "Daily work-schedule close failed");
    }

    let yesterday = today.pred_opt().unwrap_or(today);
    if let Err(e) = performance::job::run_monthly(ctx, Period::month_of(yesterday)).await {
        tracing::error!(error = %e, "Performance batch failed");
    }

    if let Some(period) = settlement_due(today)
        && let Err(e) = settlement::job::run_monthly(ctx, period, period.end).await
    {
        tracing::error!(period = %period, error = %e, "Settlement batch failed");
    }
}

/// The month to settle when `today` opens a new month
pub fn settlement_due(today: NaiveDate) -> Option<Period> {
    (today.day() == 1).then(|| Period::month_of(today).previous())
}

/// Duration until the next cutoff clock time
pub fn duration_until_next_cutoff(cutoff: NaiveTime, tz: Tz) -> std::time::Duration {
    duration_until_next_cutoff_from(chrono::Utc::now().with_timezone(&tz), cutoff, tz)
}

pub fn duration_until_next_cutoff_from(
    now: DateTime<Tz>,
    cutoff: NaiveTime,
    tz: Tz,
) -> std::time::Duration {
    let today = now.date_naive();

    let target_date = if now.time() >= cutoff {
        today + chrono::Duration::days(1)
    } else {
        today
    };

    let target_datetime = target_date
        .and_time(cutoff)
        .and_local_timezone(tz)
        .single()
        .unwrap_or_else(|| {
            // DST edge case: fall back to +1 min
            (target_date.and_time(cutoff) + chrono::Duration::minutes(1))
                .and_local_timezone(tz)
                .latest()
                .unwrap_or_else(|| {
                    tracing::error!("Cannot resolve local cutoff time, using fallback");
                    now + chrono::Duration::hours(1)
                })
        });

    let duration = target_datetime.signed_duration_since(now);
    if duration.num_seconds() <= 0 {
        std::time::Duration::from_secs(60)
    } else {
        duration
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60))
    }
}

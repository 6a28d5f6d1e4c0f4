//! settlement-server - courier performance and guarantee settlement
//!
//! One-shot mode for an external cron, or a long-running scheduler that fires
//! at the business-day cutoff.

use std::sync::Arc;

use settlement_server::cache::MemoryLocationCache;
use clap::Parser;
use settlement_server::cli::{Cli, Command};
use settlement_server::core::scheduler::DailyScheduler;
use settlement_server::core::tasks::BackgroundTasks;
use settlement_server::db::{DbService, PgStore, SettlementStore};
use settlement_server::utils::{logger, time};
use settlement_server::{Config, JobContext};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let command = Cli::parse().command;

    let config = Config::from_env()?;
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        "Starting settlement-server (env: {}, tz: {}, cutoff: {})",
        config.environment,
        config.timezone,
        config.business_day_cutoff
    );

    let db = DbService::new(&config).await?;
    let store: Arc<dyn SettlementStore> = Arc::new(PgStore::new(db.pool.clone()));
    store.ping().await?;

    let ctx = JobContext::new(store, Arc::new(MemoryLocationCache::new()), config);

    match command {
        Command::Run { job, month } => {
            let today = time::current_business_date(ctx.cutoff(), ctx.tz());
            let reports = settlement_server::run_job(&ctx, job, month, today).await?;
            for report in &reports {
                if report.failed() > 0 {
                    tracing::warn!(
                        job = report.job,
                        failed = ?report.failed_ids(),
                        "Some couriers failed"
                    );
                }
            }
            tracing::info!(%job, "Run finished");
        }
        Command::Serve => {
            let mut tasks = BackgroundTasks::new();
            let scheduler = DailyScheduler::new(ctx.clone(), tasks.shutdown_token());
            tasks.spawn("daily_scheduler", scheduler.run());

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received");
            tasks.shutdown().await;
            db.pool.close().await;
        }
    }

    Ok(())
}

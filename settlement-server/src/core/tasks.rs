//! Background tasks of `serve` mode
//!
//! Each task runs under `catch_unwind` so a panicking scheduler is logged
//! rather than lost, and every task observes one shared shutdown token.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let scheduler = DailyScheduler::new(ctx, tasks.shutdown_token());
/// tasks.spawn("daily_scheduler", scheduler.run());
/// tasks.shutdown().await;
/// ```
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic".to_string())
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Start `future` as a named task
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(()) if !shutdown.is_cancelled() => {
                    tracing::warn!(task = name, "Background task exited before shutdown");
                }
                Ok(()) => {}
                Err(payload) => {
                    tracing::error!(task = name, panic = %panic_message(payload.as_ref()), "Background task panicked");
                }
            }
        });
        tracing::debug!(task = name, "Background task started");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancel the shutdown token and wait for every task
    pub async fn shutdown(self) {
        tracing::info!(count = self.tasks.len(), "Stopping background tasks");
        self.shutdown.cancel();

        for task in self.tasks {
            if let Err(e) = task.handle.await {
                tracing::error!(task = task.name, error = ?e, "Background task join failed");
            }
        }
        tracing::info!("Background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

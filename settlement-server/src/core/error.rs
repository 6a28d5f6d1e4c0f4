//! Batch job errors
//!
//! One courier failing with a [`JobError`] never aborts a batch; the error is
//! recorded in the batch report. Only setup failures (store unreachable,
//! bad configuration) propagate out of a job entry point.

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Courier {courier_id} timed out after {secs}s")]
    Timeout { courier_id: i64, secs: u64 },

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type JobResult<T> = Result<T, JobError>;

//! Core module - configuration, job context, errors and scheduling
//!
//! # Module layout
//!
//! - [`Config`] - engine configuration
//! - [`JobContext`] - store, cache and config handed to every batch
//! - [`Period`] - settlement month and its time window
//! - [`BatchReport`] - per-courier outcomes of one batch run
//! - [`JobError`] - batch job errors

pub mod config;
pub mod context;
pub mod error;
pub mod period;
pub mod report;
pub mod scheduler;
pub mod tasks;

pub use config::Config;
pub use context::JobContext;
pub use error::{JobError, JobResult};
pub use period::{Period, TimeWindow};
pub use report::{BatchReport, CourierOutcome};

//! Utility module - shared helpers
//!
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - business timezone and garant-day conversions
//! - [`money`] - rust_decimal helpers for monetary sums

pub mod logger;
pub mod money;
pub mod time;

//! Courier settlement
//!
//! - [`calendar`] - garant days and day-off bucketing
//! - [`calculator`] - guarantee, bonus and balance figures
//! - [`job`] - monthly settlement batch

pub mod calculator;
pub mod calendar;
pub mod job;

pub use calculator::{SettlementInput, settle};

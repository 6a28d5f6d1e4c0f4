//! Shared types for the courier settlement workspace
//!
//! Domain rows read and written by the settlement engine, plus small
//! utilities used by every crate in the workspace.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::{
    BalanceTransaction, Courier, CourierPerformance, CourierSettlement, GarantTariff, Order,
    OrderStatus, PriceBand, PricingKind, PricingRuleSet, Terminal, WorkScheduleEntry,
};

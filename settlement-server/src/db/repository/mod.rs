//! Repository Module
//!
//! Parameterized Postgres queries, one module per table. Functions take a
//! `&PgPool` and return [`StoreResult`](super::StoreResult).

pub mod courier;
pub mod garant;
pub mod order;
pub mod performance;
pub mod pricing;
pub mod settlement;
pub mod terminal;
pub mod transaction;
pub mod work_schedule;

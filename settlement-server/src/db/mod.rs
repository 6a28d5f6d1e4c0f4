//! Database Module
//!
//! - [`store`] - the [`SettlementStore`] data-access interface the batches run against
//! - [`postgres`] - Postgres implementation over a `sqlx` pool
//! - [`memory`] - in-process implementation (tests, dry runs)
//! - [`repository`] - parameterized SQL, one module per table

pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{SettlementStore, StoreError, StoreResult};

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::core::Config;

/// Database service - owns the Postgres connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Connect and apply migrations
    pub async fn new(config: &Config) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            max_connections = config.db_max_connections,
            "Database connection established"
        );

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

//! SQLite record store
//!
//! Persists rental records in a single table with a `UNIQUE (tid, lokasi)`
//! constraint. All writes go through a [`StoreTx`], which also implements
//! [`RecordLedger`](crate::app::services::reconciler::RecordLedger) so an
//! import reconciles inside one transaction.
//!
//! ## Architecture
//!
//! - [`schema`] - Table definition and creation
//! - [`row_mapping`] - Column lists and row to record conversion
//! - [`transaction`] - Transactional reads and writes

pub mod row_mapping;
pub mod schema;
pub mod transaction;

#[cfg(test)]
mod tests;

pub use transaction::StoreTx;

use crate::app::models::{NaturalKey, RentalRecord};
use crate::config::DatabaseConfig;
use crate::constants::RENTAL_TABLE;
use crate::{Error, Result};
use row_mapping::{SELECT_COLUMNS, record_from_row};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Handle to the record database
#[derive(Debug, Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open (creating if needed) the database described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| Error::database(format!("Invalid database URL '{}'", config.url), e))?
            .create_if_missing(true);

        // Every connection to an in-memory database is a separate database
        let in_memory = config.url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| Error::database(format!("Failed to open {}", config.url), e))?;

        info!("Connected to record store at {}", config.url);
        Self::from_pool(pool).await
    }

    /// Fresh private in-memory store
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
    }

    /// Wrap an existing pool, creating the table if it is missing
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        schema::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction
    pub async fn begin(&self) -> Result<StoreTx> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database("Failed to start transaction", e))?;
        Ok(StoreTx::new(tx))
    }

    /// Read a record outside of any transaction
    pub async fn fetch_by_key(&self, key: &NaturalKey) -> Result<Option<RentalRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE tid = ? AND lokasi = ?",
            SELECT_COLUMNS.join(", "),
            RENTAL_TABLE
        );
        let row = sqlx::query(&sql)
            .bind(&key.tid)
            .bind(&key.lokasi)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::database(format!("Failed to look up {}", key), e))?;
        row.as_ref().map(record_from_row).transpose()
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", RENTAL_TABLE);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::database("Failed to count records", e))?;
        Ok(count)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        debug!("Closing record store");
        self.pool.close().await;
    }
}

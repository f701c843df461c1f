//! SQL repository implementations.
//!
//! Concrete implementations of [`MappingRepository`] using SQLx runtime-checked
//! queries, plus backend selection from the configured `DATABASE_URL`.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - PostgreSQL
//! - [`SqliteMappingRepository`] - SQLite (default)
//!
//! # Schema
//!
//! Both backends create a single `mappings` table with unique indexes on
//! `short_key` and `secret_key`; see `migrations/postgres` and `migrations/sqlite`.

pub mod pg_mapping_repository;
pub mod sqlite_mapping_repository;

pub use pg_mapping_repository::PgMappingRepository;
pub use sqlite_mapping_repository::SqliteMappingRepository;

use anyhow::{Context, Result};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::{Mapping, MappingState};
use crate::domain::repositories::MappingRepository;

/// Row shape shared by both backends.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MappingRow {
    pub id: i64,
    pub short_key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(
            row.id,
            row.short_key,
            row.secret_key,
            row.target_url,
            MappingState::from_active_flag(row.is_active),
            row.clicks,
        )
    }
}

/// Applies the PostgreSQL migrations.
pub async fn migrate_postgres(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await
}

/// Applies the SQLite migrations.
pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await
}

/// Connects to the configured database, applies migrations and returns the
/// matching repository.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_repository(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    let acquire_timeout = Duration::from_secs(config.db_connect_timeout);

    if config.is_sqlite() {
        let in_memory = config.database_url.contains(":memory:");
        let mut options = SqliteConnectOptions::from_str(&config.database_url)
            .context("Invalid SQLite connection string")?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.db_max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite")?;
        tracing::info!("Connected to SQLite database");

        migrate_sqlite(&pool)
            .await
            .context("Failed to migrate SQLite database")?;

        Ok(Arc::new(SqliteMappingRepository::new(Arc::new(pool))))
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!("Connected to PostgreSQL database");

        migrate_postgres(&pool)
            .await
            .context("Failed to migrate PostgreSQL database")?;

        Ok(Arc::new(PgMappingRepository::new(Arc::new(pool))))
    }
}

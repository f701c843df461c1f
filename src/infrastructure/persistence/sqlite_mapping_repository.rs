//! SQLite implementation of the mapping repository.
//!
//! SQLite is the default store for single-node deployments and the backend
//! used by the test suite (`sqlite::memory:`).

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use super::{MappingRow, migrate_sqlite};
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// SQLite repository for mapping storage and lifecycle updates.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every new in-memory connection would see an empty database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        migrate_sqlite(&pool).await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, AppError> {
        let row: MappingRow = sqlx::query_as(
            "INSERT INTO mappings (short_key, secret_key, target_url)
             VALUES (?1, ?2, ?3)
             RETURNING id, short_key, secret_key, target_url, is_active, clicks",
        )
        .bind(&new_mapping.key)
        .bind(&new_mapping.secret_key)
        .bind(&new_mapping.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn key_exists(&self, key: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mappings WHERE short_key = ?1")
            .bind(key)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn secret_key_exists(&self, secret_key: &str) -> Result<bool, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM mappings WHERE secret_key = ?1")
                .bind(secret_key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count > 0)
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "SELECT id, short_key, secret_key, target_url, is_active, clicks
             FROM mappings
             WHERE short_key = ?1 AND is_active = 1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn find_active_by_secret(
        &self,
        secret_key: &str,
    ) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "SELECT id, short_key, secret_key, target_url, is_active, clicks
             FROM mappings
             WHERE secret_key = ?1 AND is_active = 1",
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "UPDATE mappings SET clicks = clicks + 1
             WHERE id = ?1 AND is_active = 1
             RETURNING id, short_key, secret_key, target_url, is_active, clicks",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn deactivate(&self, secret_key: &str) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "UPDATE mappings SET is_active = 0
             WHERE secret_key = ?1 AND is_active = 1
             RETURNING id, short_key, secret_key, target_url, is_active, clicks",
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn count(&self, active_only: bool) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM mappings WHERE (?1 = 0 OR is_active = 1)")
                .bind(active_only)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

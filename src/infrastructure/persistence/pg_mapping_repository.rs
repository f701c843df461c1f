//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::MappingRow;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for mapping storage and lifecycle updates.
///
/// Uses bound parameters for every query; increments and deactivation are
/// single `UPDATE ... RETURNING` statements.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, AppError> {
        let row: MappingRow = sqlx::query_as(
            "INSERT INTO mappings (short_key, secret_key, target_url)
             VALUES ($1, $2, $3)
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
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM mappings WHERE short_key = $1)")
                .bind(key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn secret_key_exists(&self, secret_key: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM mappings WHERE secret_key = $1)")
                .bind(secret_key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "SELECT id, short_key, secret_key, target_url, is_active, clicks
             FROM mappings
             WHERE short_key = $1 AND is_active",
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
             WHERE secret_key = $1 AND is_active",
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "UPDATE mappings SET clicks = clicks + 1
             WHERE id = $1 AND is_active
             RETURNING id, short_key, secret_key, target_url, is_active, clicks",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn deactivate(&self, secret_key: &str) -> Result<Option<Mapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "UPDATE mappings SET is_active = FALSE
             WHERE secret_key = $1 AND is_active
             RETURNING id, short_key, secret_key, target_url, is_active, clicks",
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn count(&self, active_only: bool) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM mappings WHERE (NOT $1 OR is_active)")
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

//! Repository trait for mapping persistence.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for URL mappings.
///
/// The repository is the only writer of the `mappings` table. Implementations
/// must back `key` and `secret_key` with unique indexes and perform every
/// mutation as a single atomic statement.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a new active mapping with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key or secret key is already taken.
    /// Returns [`AppError::StorageUnavailable`] on other database errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, AppError>;

    /// Returns true if any mapping, active or inactive, uses `key`.
    async fn key_exists(&self, key: &str) -> Result<bool, AppError>;

    /// Returns true if any mapping, active or inactive, uses `secret_key`.
    async fn secret_key_exists(&self, secret_key: &str) -> Result<bool, AppError>;

    /// Finds the active mapping with the given public key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Mapping))` if an active mapping matches
    /// - `Ok(None)` if none exists or it was deactivated
    async fn find_active_by_key(&self, key: &str) -> Result<Option<Mapping>, AppError>;

    /// Finds the active mapping with the given secret key.
    async fn find_active_by_secret(&self, secret_key: &str)
    -> Result<Option<Mapping>, AppError>;

    /// Atomically adds one to the click counter of mapping `id` if it is still active.
    ///
    /// Returns `Ok(None)` if the row is missing or inactive; the counter is untouched.
    async fn increment_clicks(&self, id: i64) -> Result<Option<Mapping>, AppError>;

    /// Atomically flips the active mapping with `secret_key` to inactive.
    ///
    /// Returns `Ok(None)` if no active mapping matched.
    async fn deactivate(&self, secret_key: &str) -> Result<Option<Mapping>, AppError>;

    /// Counts mappings, optionally only the active ones.
    async fn count(&self, active_only: bool) -> Result<i64, AppError>;

    /// Round-trips a trivial query to verify connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}

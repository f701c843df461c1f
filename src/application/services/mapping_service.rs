//! Mapping creation, lookup and lifecycle service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::key_generator::{
    DEFAULT_KEY_LENGTH, DEFAULT_SECRET_SUFFIX_LENGTH, first_unused, generate_secret_key,
    generate_unique_key,
};
use crate::utils::url_validator::ensure_valid_target;

/// Key shape and collision budget used when allocating new mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPolicy {
    pub key_length: usize,
    pub secret_suffix_length: usize,
    /// Cap on taken candidates per key and on conflicting inserts per create.
    /// `None` retries until a free key is found.
    pub max_attempts: Option<usize>,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            secret_suffix_length: DEFAULT_SECRET_SUFFIX_LENGTH,
            max_attempts: Some(100),
        }
    }
}

impl KeyPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            key_length: config.key_length,
            secret_suffix_length: config.secret_suffix_length,
            max_attempts: config.max_key_attempts(),
        }
    }
}

/// Service owning the mapping lifecycle.
///
/// Validates targets, allocates unique keys, and turns storage lookups into
/// the active-only view the redirect and admin paths work with. Absent
/// mappings are reported as `Ok(None)`, never as an error.
pub struct MappingService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    policy: KeyPolicy,
}

impl<R: MappingRepository + ?Sized> MappingService<R> {
    /// Creates a new mapping service.
    pub fn new(repository: Arc<R>, policy: KeyPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Creates an active mapping with zero clicks for `target_url`.
    ///
    /// # Key Allocation
    ///
    /// - The public key is drawn until no mapping (active or inactive) uses it
    /// - The secret key is `<key>_<suffix>`, drawn until no mapping uses it
    /// - If the insert still hits a unique index (a concurrent create won the
    ///   race), both keys are drawn again
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] before touching storage if the URL is invalid.
    /// Returns [`AppError::Internal`] if the collision budget is exhausted.
    /// Returns [`AppError::Conflict`] if every insert attempt lost a race.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn create(&self, target_url: &str) -> Result<Mapping, AppError> {
        ensure_valid_target(target_url)?;

        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let new_mapping = self.allocate(target_url).await?;

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(key = %mapping.key, id = mapping.id, "Created mapping");
                    return Ok(mapping);
                }
                Err(e)
                    if e.is_conflict()
                        && self.policy.max_attempts.is_none_or(|max| attempt < max) =>
                {
                    warn!(attempt, "Key taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Draws a free key and a free secret key for a new mapping.
    async fn allocate(&self, target_url: &str) -> Result<NewMapping, AppError> {
        let repository = &self.repository;

        let key = generate_unique_key(
            self.policy.key_length,
            move |candidate: String| async move { repository.key_exists(&candidate).await },
            self.policy.max_attempts,
        )
        .await?;

        let suffix_length = self.policy.secret_suffix_length;
        let secret_key = first_unused(
            || generate_secret_key(&key, suffix_length),
            move |candidate: String| async move {
                repository.secret_key_exists(&candidate).await
            },
            self.policy.max_attempts,
        )
        .await?;

        Ok(NewMapping {
            key,
            secret_key,
            target_url: target_url.to_string(),
        })
    }

    /// Returns the active mapping for a public key, if any.
    pub async fn find_by_key(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        self.repository.find_active_by_key(key).await
    }

    /// Returns the active mapping for a secret key, if any.
    pub async fn find_by_secret(&self, secret_key: &str) -> Result<Option<Mapping>, AppError> {
        self.repository.find_active_by_secret(secret_key).await
    }

    /// Adds one click to `mapping` and returns the stored result.
    ///
    /// The increment happens in storage, so concurrent calls never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists or was deactivated
    /// after `mapping` was read.
    pub async fn increment_clicks(&self, mapping: &Mapping) -> Result<Mapping, AppError> {
        self.repository
            .increment_clicks(mapping.id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Mapping not found", json!({ "key": mapping.key }))
            })
    }

    /// Looks up an active mapping by key and records a click on it.
    ///
    /// Returns `Ok(None)` without touching the counter if no active mapping matches,
    /// including when the mapping is deactivated between lookup and increment.
    pub async fn resolve(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        let Some(mapping) = self.find_by_key(key).await? else {
            debug!(key, "No active mapping for key");
            return Ok(None);
        };

        let updated = self.repository.increment_clicks(mapping.id).await?;
        if updated.is_none() {
            debug!(key, "Mapping deactivated before the click was counted");
        }

        Ok(updated)
    }

    /// Deactivates the active mapping with `secret_key`.
    ///
    /// Returns `Ok(None)` if nothing was active under that secret key, so a
    /// repeated call is a no-op.
    pub async fn deactivate(&self, secret_key: &str) -> Result<Option<Mapping>, AppError> {
        let mapping = self.repository.deactivate(secret_key).await?;

        match &mapping {
            Some(m) => info!(key = %m.key, id = m.id, "Deactivated mapping"),
            None => debug!("Nothing to deactivate"),
        }

        Ok(mapping)
    }

    /// Counts stored mappings, optionally only active ones.
    pub async fn count(&self, active_only: bool) -> Result<i64, AppError> {
        self.repository.count(active_only).await
    }

    /// Verifies storage connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

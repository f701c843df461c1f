//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{KeyPolicy, MappingService};
use crate::domain::repositories::MappingRepository;

/// Mapping service over whichever backend was configured at startup.
pub type DynMappingService = MappingService<dyn MappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<DynMappingService>,
    /// Public origin without trailing slash, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        policy: KeyPolicy,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            mapping_service: Arc::new(MappingService::new(repository, policy)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public redirect URL for `key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Administration URL for `secret_key`.
    pub fn admin_url(&self, secret_key: &str) -> String {
        format!("{}/admin/{}", self.base_url, secret_key)
    }
}

//! DTOs for mapping creation and administration endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Mapping;
use crate::state::AppState;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMappingRequest {
    /// The destination URL. Well-formedness is checked by the service.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub target_url: String,
}

/// Public view of a mapping, returned on creation and by the admin endpoint.
///
/// `url` is the redirect link to share; `admin_url` embeds the secret key and
/// must only be given to the creator.
#[derive(Debug, Serialize)]
pub struct MappingInfo {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub url: String,
    pub admin_url: String,
}

impl MappingInfo {
    pub fn from_mapping(mapping: Mapping, state: &AppState) -> Self {
        Self {
            url: state.short_url(&mapping.key),
            admin_url: state.admin_url(&mapping.secret_key),
            is_active: mapping.is_active(),
            key: mapping.key,
            secret_key: mapping.secret_key,
            target_url: mapping.target_url,
            clicks: mapping.clicks,
        }
    }
}

/// Confirmation returned after a successful deactivation.
#[derive(Debug, Serialize)]
pub struct DeactivateResponse {
    pub detail: String,
}

//! Handlers for secret-key administration.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::mapping::{DeactivateResponse, MappingInfo};
use crate::error::AppError;
use crate::state::AppState;

fn not_found(secret_key: &str) -> AppError {
    AppError::not_found(
        "No active mapping for this secret key",
        json!({ "secret_key": secret_key }),
    )
}

/// Returns the details and click count of a mapping.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}`
///
/// # Errors
///
/// Returns 404 Not Found if the secret key is unknown or the mapping was deactivated.
pub async fn admin_info_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MappingInfo>, AppError> {
    let mapping = state
        .mapping_service
        .find_by_secret(&secret_key)
        .await?
        .ok_or_else(|| not_found(&secret_key))?;

    Ok(Json(MappingInfo::from_mapping(mapping, &state)))
}

/// Deactivates a mapping. The row is kept but no longer resolves.
///
/// # Endpoint
///
/// `DELETE /admin/{secret_key}`
///
/// # Response
///
/// ```json
/// { "detail": "Successfully deleted shortened URL for 'https://example.com/page'" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if nothing active matched, including on a repeated call.
pub async fn deactivate_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeactivateResponse>, AppError> {
    let mapping = state
        .mapping_service
        .deactivate(&secret_key)
        .await?
        .ok_or_else(|| not_found(&secret_key))?;

    Ok(Json(DeactivateResponse {
        detail: format!(
            "Successfully deleted shortened URL for '{}'",
            mapping.target_url
        ),
    }))
}

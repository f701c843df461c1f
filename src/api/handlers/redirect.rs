//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a public key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Request Flow
///
/// 1. Look up the active mapping for `key`
/// 2. Atomically add one click
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if no active mapping uses the key.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let mapping = state.mapping_service.resolve(&key).await?.ok_or_else(|| {
        AppError::not_found(
            format!("URL '{key}' doesn't exist"),
            json!({ "key": key }),
        )
    })?;

    debug!(key = %mapping.key, clicks = mapping.clicks, "Redirecting");

    Ok(Redirect::temporary(&mapping.target_url))
}

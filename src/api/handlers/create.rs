//! Handler for mapping creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::mapping::{CreateMappingRequest, MappingInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a mapping for a target URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "key": "X7K2Q",
///   "secret_key": "X7K2Q_4MZ81PQA",
///   "target_url": "https://example.com/page",
///   "is_active": true,
///   "clicks": 0,
///   "url": "http://localhost:8000/X7K2Q",
///   "admin_url": "http://localhost:8000/admin/X7K2Q_4MZ81PQA"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty, too long or malformed.
pub async fn create_mapping_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateMappingRequest>,
) -> Result<(StatusCode, Json<MappingInfo>), AppError> {
    payload.validate()?;

    let mapping = state.mapping_service.create(&payload.target_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(MappingInfo::from_mapping(mapping, &state)),
    ))
}

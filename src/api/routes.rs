//! API route configuration.
//!
//! Nothing here is authenticated: possession of a secret key is the
//! credential for the administration endpoints.

use crate::api::handlers::{
    admin_info_handler, create_mapping_handler, deactivate_handler, health_handler,
    index_handler, redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes, without middleware.
///
/// # Endpoints
///
/// - `GET    /`                    - Landing page
/// - `GET    /health`              - Health check
/// - `POST   /url`                 - Create a mapping
/// - `GET    /admin/{secret_key}`  - Mapping details and clicks
/// - `DELETE /admin/{secret_key}`  - Deactivate a mapping
/// - `GET    /{key}`               - Redirect to the target URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/url", post(create_mapping_handler))
        .route(
            "/admin/{secret_key}",
            get(admin_info_handler).delete(deactivate_handler),
        )
        .route("/{key}", get(redirect_handler))
}

//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{key}`        - Short URL redirect
//! - `POST /url`          - Mapping creation
//! - `/admin/{secret}`    - Secret-key administration
//! - `GET  /health`       - Health check
//! - `/static/*`          - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding `REQUEST_TIMEOUT_SECONDS` get 408
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound on the time spent handling one request
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

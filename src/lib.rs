//! # shortkey
//!
//! A URL shortener with per-mapping secret management keys, built with Axum and SQLx.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Mapping entity and repository trait
//! - **Application Layer** ([`application`]) - Key allocation and mapping lifecycle
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and SQLite storage
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Short random public keys with collision retry
//! - Secret keys for inspecting and deactivating a mapping
//! - Atomic click counting
//! - Soft deletion: deactivated keys are never reissued
//!
//! ## Quick Start
//!
//! ```bash
//! # SQLite file in the working directory (default)
//! export DATABASE_URL="sqlite://shortener.db"
//! export BASE_URL="http://localhost:8000"
//!
//! # Start the service; migrations run on startup
//! cargo run
//!
//! # Create a mapping
//! curl -X POST localhost:8000/url -H 'content-type: application/json' \
//!      -d '{"target_url":"https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{KeyPolicy, MappingService};
    pub use crate::domain::entities::{Mapping, MappingState, NewMapping};
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod create;
pub mod health;
pub mod index;
pub mod redirect;

pub use admin::{admin_info_handler, deactivate_handler};
pub use create::create_mapping_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;

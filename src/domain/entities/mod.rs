//! Core domain entities.
//!
//! - [`Mapping`] - A persisted short key / secret key / target URL record
//! - [`MappingState`] - Active or inactive lifecycle state
//! - [`NewMapping`] - Input for inserting a mapping

pub mod mapping;

pub use mapping::{Mapping, MappingState, NewMapping};

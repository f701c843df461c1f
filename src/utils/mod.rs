//! Utility functions for key generation, URL validation, and error classification.
//!
//! - [`key_generator`] - Random key generation and the collision retry combinator
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Unique-constraint violation detection

pub mod db_error;
pub mod key_generator;
pub mod url_validator;

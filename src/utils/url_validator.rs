//! Target URL validation.
//!
//! A target must be an absolute `http`/`https` URL with a host. It is stored
//! exactly as supplied; validation never rewrites it.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Maximum accepted length of a target URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL must not contain surrounding whitespace")]
    SurroundingWhitespace,

    #[error("URL exceeds {MAX_URL_LENGTH} bytes")]
    TooLong,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first rule that failed.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/page").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Validates a target URL, converting failures into [`AppError::InvalidUrl`].
pub fn ensure_valid_target(input: &str) -> Result<(), AppError> {
    validate_url(input).map_err(|e| {
        AppError::invalid_url(
            "Your provided URL is not valid",
            json!({ "reason": e.to_string() }),
        )
    })
}

//! HTTP request/response tracing middleware.
//!
//! Secret keys are credentials, so the request span never records the secret
//! part of an `/admin/{secret_key}` path.

use std::borrow::Cow;

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::utils::key_generator::SECRET_SEPARATOR;

const ADMIN_PREFIX: &str = "/admin/";

/// Builds the request span with a redacted path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactedMakeSpan;

impl<B> MakeSpan<B> for RedactedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %redact_path(request.uri().path()),
            version = ?request.version(),
        )
    }
}

/// Replaces the random suffix of a secret key in an admin path.
///
/// `/admin/X7K2Q_4MZ81PQA` becomes `/admin/X7K2Q_***`; the public key stays
/// visible so log lines can still be correlated with redirects.
pub fn redact_path(path: &str) -> Cow<'_, str> {
    let Some(secret) = path.strip_prefix(ADMIN_PREFIX) else {
        return Cow::Borrowed(path);
    };

    if secret.is_empty() {
        return Cow::Borrowed(path);
    }

    let key = secret
        .split_once(SECRET_SEPARATOR)
        .map(|(key, _)| key)
        .unwrap_or("");

    Cow::Owned(format!("{ADMIN_PREFIX}{key}{SECRET_SEPARATOR}***"))
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/X7K2Q version=HTTP/1.1}: finished processing request latency=3 ms status=307
/// INFO request{method=DELETE path=/admin/X7K2Q_*** version=HTTP/1.1}: finished processing request latency=5 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RedactedMakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RedactedMakeSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths_are_unchanged() {
        assert_eq!(redact_path("/X7K2Q"), "/X7K2Q");
        assert_eq!(redact_path("/url"), "/url");
        assert_eq!(redact_path("/admin/"), "/admin/");
    }

    #[test]
    fn test_secret_suffix_is_hidden() {
        assert_eq!(redact_path("/admin/X7K2Q_4MZ81PQA"), "/admin/X7K2Q_***");
    }

    #[test]
    fn test_malformed_secret_is_hidden_entirely() {
        let redacted = redact_path("/admin/NOSEPARATOR");

        assert_eq!(redacted, "/admin/_***");
        assert!(!redacted.contains("NOSEPARATOR"));
    }
}

//! Short key and secret key generation.
//!
//! Keys are drawn from the operating system CSPRNG, because the secret key
//! doubles as the only credential for managing a mapping. Uniqueness is not a
//! property of the generator itself: [`first_unused`] keeps drawing candidates
//! until an injected existence check reports a free one.

use std::future::Future;

use rand::{Rng, TryRngCore, rngs::OsRng};
use serde_json::json;

use crate::error::AppError;

/// Symbols a key is built from: `A-Z` then `0-9`.
pub const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of the public short key.
pub const DEFAULT_KEY_LENGTH: usize = 5;

/// Default length of the random part appended to a key to form its secret key.
pub const DEFAULT_SECRET_SUFFIX_LENGTH: usize = 8;

/// Separator between the public key and the secret suffix.
pub const SECRET_SEPARATOR: char = '_';

/// Returns `length` characters drawn uniformly from [`KEY_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let key = generate_random_key(5);
/// assert_eq!(key.len(), 5);
/// assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
/// ```
pub fn generate_random_key(length: usize) -> String {
    let mut rng = OsRng.unwrap_err();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..KEY_ALPHABET.len());
            KEY_ALPHABET[idx] as char
        })
        .collect()
}

/// Builds a secret key of the form `<key>_<suffix>`.
///
/// The suffix is generated independently, so the secret cannot be derived from
/// the public key.
pub fn generate_secret_key(key: &str, suffix_length: usize) -> String {
    format!(
        "{key}{SECRET_SEPARATOR}{}",
        generate_random_key(suffix_length)
    )
}

/// Returns the first candidate for which `exists` reports `false`.
///
/// `exists` is awaited exactly once per candidate drawn from `next_candidate`.
/// With `max_attempts = None` the loop is unbounded; with `Some(n)` it gives up
/// after `n` taken candidates and returns [`AppError::Internal`].
///
/// # Errors
///
/// Errors returned by `exists` are propagated immediately.
pub async fn first_unused<G, F, Fut>(
    mut next_candidate: G,
    mut exists: F,
    max_attempts: Option<usize>,
) -> Result<String, AppError>
where
    G: FnMut() -> String,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let mut attempts = 0usize;

    loop {
        let candidate = next_candidate();
        attempts += 1;

        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }

        tracing::debug!(attempt = attempts, "Candidate key already taken");

        if max_attempts.is_some_and(|max| attempts >= max) {
            tracing::warn!(attempts, "Giving up on key generation");
            return Err(AppError::internal(
                "Failed to generate unique key",
                json!({ "reason": "Too many collisions", "attempts": attempts }),
            ));
        }
    }
}

/// Generates a random key of `length` characters that `exists` reports as free.
pub async fn generate_unique_key<F, Fut>(
    length: usize,
    exists: F,
    max_attempts: Option<usize>,
) -> Result<String, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    first_unused(|| generate_random_key(length), exists, max_attempts).await
}

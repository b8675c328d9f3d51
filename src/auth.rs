//! API-key check for the upload route.
//!
//! The caller's `x-api-key` header is compared against the configured secret
//! in constant time. Health endpoints are mounted outside this layer.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Rejects the request with `401 {"error":"unauthorized"}` unless the header
/// matches. The key value itself is never logged.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if secure_compare(key, &state.api_key) => next.run(request).await,
        _ => {
            tracing::warn!("rejected request with missing or invalid api key");
            AppError::unauthorized().into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::secure_compare;

    #[test]
    fn matching_keys_pass() {
        assert!(secure_compare("tok-123", "tok-123"));
    }

    #[test]
    fn mismatched_keys_fail() {
        assert!(!secure_compare("tok-123", "tok-124"));
    }

    #[test]
    fn length_mismatch_fails_before_comparison() {
        assert!(!secure_compare("short", "a-much-longer-secret"));
    }

    #[test]
    fn empty_key_never_matches() {
        assert!(!secure_compare("", "secret"));
    }
}

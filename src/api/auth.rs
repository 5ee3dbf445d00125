//! Shared-secret API key gate for the report routes.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, AppError};

use super::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Compare the `x-api-key` header against the configured secret.
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if provided.len() != expected.len() {
        return Err(AppError::Unauthorized);
    }
    let diff = provided
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));

    if diff == 0 {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Runs ahead of routing to the method handler, so a bad key is a 401 for
/// every method.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = check_api_key(request.headers(), &state.config.api_secret_key) {
        let reason = if request.headers().contains_key(API_KEY_HEADER) {
            "key mismatch"
        } else {
            "missing key"
        };
        tracing::warn!(
            "[AUTH] Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            reason
        );
        return ApiError::from(e).into_response();
    }

    next.run(request).await
}

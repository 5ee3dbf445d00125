//! Error types for the report endpoint.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for request processing
//! - `ApiError`: Wrapper that turns an `AppError` into an HTTP response
//! - `Result<T>`: Type alias for Results using AppError

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for report generation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or mismatched API key
    #[error("Unauthorized")]
    Unauthorized,

    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body is missing the audit report or is not valid JSON
    #[error("Invalid PageSpeed data: {0}")]
    Validation(String),

    /// Request body exceeds the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// HTML to PDF conversion failed
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Render(_) | AppError::Config(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge(rejection.body_text()),
            _ => Self::Validation(rejection.body_text()),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// API ERROR (FOR AXUM)
// ============================================================================

const PROCESSING_FAILED: &str = "Error generating report";

/// Wrapper for errors returned from HTTP handlers.
///
/// Processing failures are reported with a generic message; the full error
/// chain is attached as `details` only when `expose_details` is set.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub expose_details: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self { error, expose_details }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error, false)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("[HTTP] Report processing failed: {:#}", self.error);
            ErrorBody {
                success: false,
                error: PROCESSING_FAILED.to_string(),
                details: self.expose_details.then(|| chain(&self.error)),
            }
        } else {
            ErrorBody {
                success: false,
                error: self.error.to_string(),
                details: None,
            }
        };

        (status, Json(body)).into_response()
    }
}

fn chain(error: &AppError) -> String {
    match error {
        AppError::Other(inner) => format!("{:#}", inner),
        other => other.to_string(),
    }
}

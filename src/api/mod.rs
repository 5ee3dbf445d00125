//! HTTP surface: API key gate, method gate and the two report endpoints.

pub mod auth;
pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{ApiError, AppError};
use crate::service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reports: Arc<ReportService>,
}

impl AppState {
    pub fn new(config: AppConfig, reports: ReportService) -> Self {
        Self {
            config: Arc::new(config),
            reports: Arc::new(reports),
        }
    }

    /// Attach error details unless running in production.
    pub fn api_error(&self, error: AppError) -> ApiError {
        ApiError::new(error, !self.config.is_production())
    }
}

pub fn build_router(state: AppState) -> Router {
    let reports = Router::new()
        .route(
            "/api/generate-pdf-report",
            post(handlers::generate_pdf_report).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/process-report",
            post(handlers::process_report).fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(reports)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

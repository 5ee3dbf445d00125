//! Handlers for the report endpoints and the health probe.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::ReportSummary;
use crate::error::{ApiError, AppError};
use crate::service::naming::report_filename;

use super::requests::ReportRequest;
use super::responses::{HealthResponse, PdfReportResponse, ProcessReportResponse};
use super::AppState;

/// Validate the body and run the classification pipeline.
fn prepare(state: &AppState, body: &[u8]) -> Result<(ReportSummary, String), AppError> {
    let request = ReportRequest::parse(body)?;
    let report = request.audit_report()?;
    let meta = request.metadata(Utc::now());
    let filename = report_filename(&meta.client.name, meta.timestamp);

    Ok((state.reports.summarize(&report, meta), filename))
}

pub async fn process_report(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProcessReportResponse>, ApiError> {
    let body = body.map_err(|e| state.api_error(e.into()))?;
    let request_id = Uuid::new_v4();
    tracing::info!("[HTTP] {} process-report ({} bytes)", request_id, body.len());

    let (summary, filename) = prepare(&state, &body).map_err(|e| state.api_error(e))?;

    tracing::info!("[HTTP] {} -> {}", request_id, filename);
    Ok(Json(ProcessReportResponse {
        success: true,
        filename,
        summary,
    }))
}

pub async fn generate_pdf_report(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PdfReportResponse>, ApiError> {
    let body = body.map_err(|e| state.api_error(e.into()))?;
    let request_id = Uuid::new_v4();
    tracing::info!("[HTTP] {} generate-pdf-report ({} bytes)", request_id, body.len());

    let (summary, filename) = prepare(&state, &body).map_err(|e| state.api_error(e))?;
    let pdf = state
        .reports
        .render_pdf(&summary)
        .await
        .map_err(|e| state.api_error(e))?;

    tracing::info!("[HTTP] {} -> {} ({} bytes)", request_id, filename, pdf.len());
    Ok(Json(PdfReportResponse {
        success: true,
        pdf: BASE64_STANDARD.encode(pdf),
        filename,
        summary,
    }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::from(AppError::MethodNotAllowed)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        renderer: state.reports.renderer_name(),
    })
}

//! Response bodies for the report endpoints.

use serde::Serialize;

use crate::domain::models::ReportSummary;

/// `POST /api/process-report`
#[derive(Debug, Serialize)]
pub struct ProcessReportResponse {
    pub success: bool,
    pub filename: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
}

/// `POST /api/generate-pdf-report`; `pdf` is standard base64.
#[derive(Debug, Serialize)]
pub struct PdfReportResponse {
    pub success: bool,
    pub pdf: String,
    pub filename: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub renderer: &'static str,
}

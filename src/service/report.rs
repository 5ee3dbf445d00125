//! ReportService - runs the classification pipeline and hands the result to
//! the document collaborators.

use std::sync::Arc;

use crate::domain::models::{
    CategoryScores, Grade, ProcessedReport, RawAuditReport, ReportMetadata, ReportSummary,
};
use crate::error::{AppError, Result};
use crate::service::classifier::classify_report;
use crate::service::html::render_report_html;
use crate::service::metrics::{extract_metrics, metrics_map};
use crate::service::renderer::PdfRenderer;

/// Derive every report field from one audit report.
pub fn build_report(report: &RawAuditReport) -> ProcessedReport {
    let scores = CategoryScores {
        performance: report.category_percent("performance"),
        seo: report.category_percent("seo"),
        accessibility: report.category_percent("accessibility"),
        best_practices: report.category_percent("best-practices"),
    };

    let findings = classify_report(report);
    let metrics = extract_metrics(report);
    let metrics_map = metrics_map(&metrics);

    ProcessedReport {
        scores,
        grade: Grade::from_percent(scores.performance),
        bad: findings.bad,
        good: findings.good,
        info: findings.info,
        has_critical_issues: findings.has_critical_issues,
        metrics,
        metrics_map,
    }
}

pub struct ReportService {
    renderer: Arc<dyn PdfRenderer>,
}

impl ReportService {
    pub fn new(renderer: Arc<dyn PdfRenderer>) -> Self {
        Self { renderer }
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    pub fn summarize(&self, report: &RawAuditReport, meta: ReportMetadata) -> ReportSummary {
        let processed = build_report(report);
        tracing::info!(
            "[REPORT] {}: performance {} ({}), {} bad / {} good / {} info",
            meta.site.name,
            processed.scores.performance,
            processed.grade.label(),
            processed.bad.count,
            processed.good.count,
            processed.info.count
        );
        ReportSummary::new(processed, meta)
    }

    /// Render the summary as HTML and convert it to PDF bytes.
    pub async fn render_pdf(&self, summary: &ReportSummary) -> Result<Vec<u8>> {
        let html = render_report_html(summary);
        let pdf = self.renderer.render(&html).await?;
        if pdf.is_empty() {
            return Err(AppError::render(format!(
                "{} produced an empty document",
                self.renderer.name()
            )));
        }
        tracing::info!("[PDF] Rendered {} bytes with {}", pdf.len(), self.renderer.name());
        Ok(pdf)
    }
}

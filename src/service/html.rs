//! Print-ready HTML rendering of a report summary.

use crate::domain::models::{Finding, MetricItem, MetricStatus, ReportSummary, Severity};

/// Render a self-contained HTML document for the PDF renderer.
pub fn render_report_html(summary: &ReportSummary) -> String {
    let score_gradient = if summary.has_critical_issues {
        "#eb3349,#f45c43"
    } else {
        "#667eea,#764ba2"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Reporte de Rendimiento Web - {site_name}</title>
<style>
@page{{size:A4;margin:20px}}
*{{margin:0;padding:0;box-sizing:border-box}}
body{{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Arial,sans-serif;padding:40px;color:#1a1a1a;line-height:1.6;background:#fff;-webkit-print-color-adjust:exact;print-color-adjust:exact}}
.header{{border-bottom:4px solid #0066cc;padding-bottom:20px;margin-bottom:30px}}
.header h1{{color:#0066cc;font-size:32px;margin-bottom:12px;font-weight:700}}
.site-info{{font-size:16px;color:#333;margin-bottom:8px}}
.site-url{{color:#666;font-size:14px;font-family:monospace;background:#f5f5f5;padding:6px 12px;border-radius:4px;display:inline-block}}
.date{{color:#888;font-size:13px;margin-top:8px}}
.score-box{{background:linear-gradient(135deg,{score_gradient});color:#fff;padding:40px;border-radius:12px;text-align:center;margin:30px 0}}
.score{{font-size:72px;font-weight:700;margin-bottom:10px}}
.grade{{font-size:22px;opacity:0.95}}
.categories,.metrics{{display:grid;gap:15px;margin:30px 0}}
.categories{{grid-template-columns:repeat(4,1fr)}}
.metrics{{grid-template-columns:repeat(3,1fr)}}
.tile{{background:#f8f9fa;border:2px solid #e5e7eb;padding:20px;border-radius:8px;text-align:center}}
.tile .label{{font-size:11px;color:#666;text-transform:uppercase;letter-spacing:0.5px;margin-bottom:8px;font-weight:600}}
.tile .value{{font-size:24px;font-weight:700}}
.status-good{{border-color:#10b981}}.status-good .value{{color:#059669}}
.status-warn{{border-color:#f59e0b}}.status-warn .value{{color:#d97706}}
.status-bad{{border-color:#ef4444}}.status-bad .value{{color:#dc2626}}
.section{{margin:40px 0}}
.section h2{{font-size:24px;margin-bottom:20px;padding-bottom:12px;border-bottom:3px solid #e5e7eb}}
.section.good h2{{color:#059669;border-bottom-color:#10b981}}
.section.bad h2{{color:#dc2626;border-bottom-color:#ef4444}}
.section.info h2{{color:#2563eb;border-bottom-color:#3b82f6}}
.finding{{margin-bottom:20px;page-break-inside:avoid}}
.finding.bad{{padding:15px;background:#fef2f2;border-left:4px solid #ef4444;border-radius:4px}}
.finding .title{{font-weight:600;margin-bottom:5px}}
.finding.severity-high{{border-left-color:#f97316}}
.finding.severity-medium{{border-left-color:#eab308}}
.finding .body{{padding-left:25px;color:#444;font-size:13px;line-height:1.7}}
.empty{{color:#6b7280;font-style:italic}}
.footer{{margin-top:50px;padding-top:20px;border-top:2px solid #e5e7eb;text-align:center;color:#6b7280;font-size:12px;line-height:1.8}}
</style>
</head>
<body>

<div class="header">
<h1>Reporte de Rendimiento Web</h1>
<div class="site-info"><strong>{site_name}</strong></div>
<div class="site-url">{site_url}</div>
<div class="date">Generado: {report_date}</div>
</div>

<div class="score-box">
<div class="score">{performance}</div>
<div class="grade">{grade}</div>
</div>

<div class="categories">
{category_tiles}
</div>

<div class="metrics">
{metric_tiles}
</div>

<div class="section bad">
<h2>⚠ Oportunidades de Mejora ({bad_count} puntos)</h2>
{bad_points}
</div>

<div style="page-break-before:always"></div>

<div class="section good">
<h2>✓ Aspectos Bien Implementados ({good_count} puntos)</h2>
{good_points}
</div>

<div class="section info">
<h2>ℹ Información Adicional ({info_count} puntos)</h2>
{info_points}
</div>

<div class="footer">
<p><strong>¿Cómo usar este reporte?</strong></p>
<p>Las recomendaciones están ordenadas por prioridad e impacto.<br>
Los emojis indican urgencia: 🔴 Crítico, 🟠 Alto, 🟡 Medio</p>
<p style="margin-top:12px">Generado automáticamente con Google PageSpeed Insights</p>
</div>

</body>
</html>
"#,
        site_name = escape_html(&summary.site.name),
        site_url = escape_html(&summary.site.url),
        report_date = escape_html(&summary.report_date),
        score_gradient = score_gradient,
        performance = summary.performance_score,
        grade = escape_html(summary.performance_grade.label()),
        category_tiles = build_category_tiles(summary),
        metric_tiles = build_metric_tiles(&summary.speed_metrics),
        bad_count = summary.bad_points_count,
        bad_points = build_findings(&summary.bad_points, "bad"),
        good_count = summary.good_points_count,
        good_points = build_findings(&summary.good_points, "good"),
        info_count = summary.info_points_count,
        info_points = build_findings(&summary.info_points, "info"),
    )
}

fn build_category_tiles(summary: &ReportSummary) -> String {
    let tiles = [
        ("Performance", summary.performance_score),
        ("SEO", summary.seo_score),
        ("Accesibilidad", summary.accessibility_score),
        ("Best Practices", summary.best_practices_score),
    ];

    tiles
        .iter()
        .map(|(label, score)| {
            format!(
                r#"<div class="tile"><div class="label">{}</div><div class="value">{}</div></div>"#,
                label, score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_metric_tiles(metrics: &[MetricItem]) -> String {
    metrics
        .iter()
        .map(|m| {
            let class = match m.status {
                MetricStatus::Neutral => String::new(),
                status => format!(" status-{}", status.as_str()),
            };
            format!(
                r#"<div class="tile{}"><div class="label">{}</div><div class="value">{}</div></div>"#,
                class,
                escape_html(&m.label),
                escape_html(&m.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRÍTICO",
        Severity::High => "ALTO",
        Severity::Medium => "MEDIO",
        Severity::Pass => "OK",
        Severity::Info => "INFO",
    }
}

fn build_findings(findings: &[Finding], kind: &str) -> String {
    if findings.is_empty() {
        return r#"<p class="empty">Sin puntos en esta sección.</p>"#.to_string();
    }

    let mut html = String::new();
    for (i, f) in findings.iter().enumerate() {
        let heading = if kind == "bad" {
            format!(
                "{}. {} {} - {}: {}",
                i + 1,
                f.emoji,
                severity_label(f.severity),
                escape_html(&f.category),
                escape_html(&f.title)
            )
        } else {
            format!(
                "{}. {} {}: {}",
                i + 1,
                f.emoji,
                escape_html(&f.category),
                escape_html(&f.title)
            )
        };

        let display_value = if f.display_value.is_empty() {
            String::new()
        } else {
            format!("<br><strong>📊 Valor:</strong> {}", escape_html(&f.display_value))
        };

        html.push_str(&format!(
            r#"<div class="finding {kind} severity-{severity}"><div class="title">{heading}</div><div class="body">{description}{display_value}</div></div>"#,
            kind = kind,
            severity = f.severity.as_str(),
            heading = heading,
            description = escape_html(&f.description),
            display_value = display_value,
        ));
        html.push('\n');
    }
    html
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

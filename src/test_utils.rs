//! Shared test utilities and fixtures
//!
//! This module provides common test helpers to reduce duplication
//! and make tests more robust against implementation changes.

pub mod fixtures {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Map, Value};

    use crate::error::{AppError, Result};
    use crate::service::renderer::PdfRenderer;

    pub const TEST_API_KEY: &str = "test-secret-key";

    fn audit(title: &str, description: &str, score: Value, mode: &str, display: &str) -> Value {
        json!({
            "title": title,
            "description": description,
            "score": score,
            "scoreDisplayMode": mode,
            "displayValue": display,
        })
    }

    fn refs(ids: &[&str]) -> Value {
        Value::Array(ids.iter().map(|id| json!({ "id": id })).collect())
    }

    /// A small but complete `lighthouseResult`.
    ///
    /// Produces 6 bad (4 critical, 2 high), 9 good and 2 info findings; one
    /// manual and one not-applicable audit are referenced but excluded.
    pub fn lighthouse_result() -> Value {
        json!({
            "categories": {
                "performance": {
                    "score": 0.62,
                    "auditRefs": refs(&[
                        "first-contentful-paint",
                        "largest-contentful-paint",
                        "total-blocking-time",
                        "cumulative-layout-shift",
                        "speed-index",
                        "interactive",
                        "render-blocking-resources",
                        "unused-javascript",
                        "mainthread-work-breakdown",
                        "third-party-summary",
                    ]),
                },
                "seo": {
                    "score": 0.91,
                    "auditRefs": refs(&["document-title", "meta-description", "link-text", "structured-data"]),
                },
                "accessibility": {
                    "score": 0.88,
                    "auditRefs": refs(&["color-contrast", "image-alt", "viewport"]),
                },
                "best-practices": {
                    "score": 0.75,
                    "auditRefs": refs(&["is-on-https", "errors-in-console"]),
                },
            },
            "audits": {
                "first-contentful-paint": audit("First Contentful Paint", "First paint of text or image.", json!(0.95), "numeric", "1.2 s"),
                "largest-contentful-paint": audit("Largest Contentful Paint", "Largest element paint time.", json!(0.92), "numeric", "2.1 s"),
                "total-blocking-time": audit("Total Blocking Time", "Sum of long task time.", json!(0.6), "numeric", "420 ms"),
                "cumulative-layout-shift": audit("Cumulative Layout Shift", "Movement of visible elements.", json!(1), "numeric", "0.01"),
                "speed-index": audit("Speed Index", "How quickly content is visibly populated.", json!(0.91), "numeric", "2.4 s"),
                "interactive": audit("Time to Interactive", "Time until the page is fully interactive.", json!(0.9), "numeric", "3.1 s"),
                "render-blocking-resources": audit(
                    "Eliminate render-blocking resources",
                    "Resources are blocking the first paint. [Learn more](https://developer.chrome.com/docs/lighthouse/performance/render-blocking-resources/).",
                    json!(0.3),
                    "numeric",
                    "Potential savings of 1,250 ms",
                ),
                "unused-javascript": audit("Reduce unused JavaScript", "Reduce unused JavaScript and defer scripts.", json!(0.55), "numeric", "Potential savings of 180 KiB"),
                "mainthread-work-breakdown": audit("Minimize main-thread work", "Consider reducing parse and execution time.", Value::Null, "informative", "3.4 s"),
                "third-party-summary": audit("Reduce the impact of third-party code", "", Value::Null, "informative", ""),
                "document-title": audit("Document has a `<title>` element", "The title gives screen reader users an overview.", json!(1), "binary", ""),
                "meta-description": audit("Document does not have a meta description", "Meta descriptions may be included in search results.", json!(0), "binary", ""),
                "link-text": audit("Links have descriptive text", "Descriptive link text helps search engines. [Learn how](https://example.com/link-text).", json!(1), "binary", ""),
                "structured-data": audit("Structured data is valid", "Run the Structured Data Linting Tool.", Value::Null, "manual", ""),
                "color-contrast": audit("Background and foreground colors do not have a sufficient contrast ratio", "Low-contrast text is difficult to read.", json!(0), "binary", ""),
                "image-alt": audit("Image elements have `[alt]` attributes", "Informative elements should aim for short text.", json!(1), "binary", ""),
                "viewport": audit("Viewport not applicable", "", Value::Null, "notApplicable", ""),
                "is-on-https": audit("Uses HTTPS", "All sites should be protected with HTTPS.", json!(1), "binary", ""),
                "errors-in-console": audit("Browser errors were logged to the console", "Errors logged to the console indicate unresolved problems.", json!(0), "binary", ""),
                "screenshot-thumbnails": audit("Screenshot Thumbnails", "Unreferenced audit.", json!(0), "numeric", ""),
            },
        })
    }

    /// A synthetic report with `n` audits spread over the four categories,
    /// mixing every score display mode.
    pub fn large_lighthouse_result(n: usize) -> Value {
        const KEYS: [&str; 4] = ["performance", "seo", "accessibility", "best-practices"];
        let mut ids: Vec<Vec<String>> = vec![Vec::new(); KEYS.len()];
        let mut audits = Map::new();

        for i in 0..n {
            let id = format!("audit-{i:04}");
            let mode = match i % 7 {
                0 => "binary",
                1 => "informative",
                2 => "manual",
                _ => "numeric",
            };
            let score = match mode {
                "binary" => json!(if i % 2 == 0 { 0 } else { 1 }),
                "informative" | "manual" => Value::Null,
                _ => json!(((i * 37) % 101) as f64 / 100.0),
            };
            let title = format!("Check {:03} [{}]", (i * 13) % n.max(1), mode);
            audits.insert(id.clone(), audit(&title, "Synthetic audit.", score, mode, ""));
            ids[i % KEYS.len()].push(id);
        }

        let categories: Map<String, Value> = KEYS
            .iter()
            .zip(ids)
            .enumerate()
            .map(|(i, (key, ids))| {
                let refs: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
                (
                    key.to_string(),
                    json!({ "score": 0.25 * (i as f64 + 1.0), "auditRefs": refs }),
                )
            })
            .collect();

        json!({ "categories": categories, "audits": audits })
    }

    /// Request body wrapping a `lighthouseResult`.
    pub fn psi_request(lighthouse_result: Value) -> Value {
        json!({
            "psiData": { "lighthouseResult": lighthouse_result },
            "clientName": "Panadería Luna",
            "siteUrl": "https://www.panaderia-luna.mx/",
            "email": "contacto@panaderia-luna.mx",
            "phone": "+52 55 1234 5678",
        })
    }

    /// Renderer returning fixed bytes and remembering the last document.
    pub struct StaticRenderer {
        bytes: Vec<u8>,
        last_html: Mutex<Option<String>>,
    }

    impl StaticRenderer {
        pub fn new(bytes: Vec<u8>) -> Self {
            Self { bytes, last_html: Mutex::new(None) }
        }

        pub fn last_html(&self) -> Option<String> {
            self.last_html.lock().ok().and_then(|html| html.clone())
        }
    }

    impl Default for StaticRenderer {
        fn default() -> Self {
            Self::new(b"%PDF-1.4\n%static test document\n%%EOF\n".to_vec())
        }
    }

    #[async_trait]
    impl PdfRenderer for StaticRenderer {
        async fn render(&self, html: &str) -> Result<Vec<u8>> {
            if let Ok(mut last) = self.last_html.lock() {
                *last = Some(html.to_string());
            }
            Ok(self.bytes.clone())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    /// Renderer that always fails, as a crashed browser would.
    pub struct FailingRenderer;

    #[async_trait]
    impl PdfRenderer for FailingRenderer {
        async fn render(&self, _html: &str) -> Result<Vec<u8>> {
            Err(AppError::render("browser exited with status 1: crashed"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }
}

/// Helper assertions for tests
#[cfg(test)]
pub mod assertions {
    use crate::domain::models::Finding;

    /// Checks if findings contain a specific title
    pub fn has_finding(findings: &[Finding], title: &str) -> bool {
        findings.iter().any(|f| f.title == title)
    }

    /// Titles in display order
    pub fn titles(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.title.as_str()).collect()
    }
}

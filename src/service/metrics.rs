//! Core Web Vitals style metrics view.

use std::collections::BTreeMap;

use crate::domain::models::{MetricItem, MetricStatus, RawAuditReport};

/// Shown when a tracked metric has no display value.
pub const NOT_AVAILABLE: &str = "N/A";

/// (audit id, short key, label) in display order.
pub const TRACKED_METRICS: &[(&str, &str, &str)] = &[
    ("first-contentful-paint", "fcp", "First Contentful Paint"),
    ("largest-contentful-paint", "lcp", "Largest Contentful Paint"),
    ("total-blocking-time", "tbt", "Total Blocking Time"),
    ("cumulative-layout-shift", "cls", "Cumulative Layout Shift"),
    ("speed-index", "si", "Speed Index"),
    ("interactive", "tti", "Time to Interactive"),
];

/// Tracked metrics present in the report, in fixed order. Missing audits
/// are omitted.
pub fn extract_metrics(report: &RawAuditReport) -> Vec<MetricItem> {
    TRACKED_METRICS
        .iter()
        .filter_map(|(audit_id, key, label)| {
            let audit = report.audit(audit_id)?;
            Some(MetricItem {
                key: key.to_string(),
                label: label.to_string(),
                value: audit
                    .display_value
                    .clone()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                status: MetricStatus::from_score(audit.score),
            })
        })
        .collect()
}

/// `key → value` view of the same list.
pub fn metrics_map(items: &[MetricItem]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|m| (m.key.clone(), m.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metric(score: serde_json::Value, value: &str) -> serde_json::Value {
        json!({ "title": "metric", "score": score, "scoreDisplayMode": "numeric", "displayValue": value })
    }

    #[test]
    fn statuses_follow_fixed_order() {
        let report = RawAuditReport::from(&json!({
            "audits": {
                "interactive": metric(json!(0.95), "2.0 s"),
                "speed-index": metric(json!(0.95), "1.9 s"),
                "cumulative-layout-shift": metric(json!(0.95), "0.01"),
                "total-blocking-time": metric(json!(0.6), "350 ms"),
                "largest-contentful-paint": metric(json!(0.95), "1.8 s"),
                "first-contentful-paint": metric(json!(0.95), "0.9 s")
            }
        }));

        let items = extract_metrics(&report);
        let keys: Vec<_> = items.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["fcp", "lcp", "tbt", "cls", "si", "tti"]);

        let statuses: Vec<_> = items.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            [
                MetricStatus::Good,
                MetricStatus::Good,
                MetricStatus::Warn,
                MetricStatus::Good,
                MetricStatus::Good,
                MetricStatus::Good
            ]
        );
    }

    #[test]
    fn missing_metrics_are_omitted_not_padded() {
        let report = RawAuditReport::from(&json!({
            "audits": {
                "speed-index": { "score": null, "scoreDisplayMode": "numeric" },
                "first-contentful-paint": metric(json!(0.2), "4.1 s")
            }
        }));

        let items = extract_metrics(&report);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "fcp");
        assert_eq!(items[0].status, MetricStatus::Bad);
        assert_eq!(items[1].value, NOT_AVAILABLE);
        assert_eq!(items[1].status, MetricStatus::Neutral);

        let map = metrics_map(&items);
        assert_eq!(map.get("fcp").map(String::as_str), Some("4.1 s"));
        assert_eq!(map.get("si").map(String::as_str), Some(NOT_AVAILABLE));
        assert!(!map.contains_key("lcp"));
    }
}

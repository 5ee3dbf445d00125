//! Adapter layer for converting raw Lighthouse JSON into domain models.
//!
//! Decoding is lenient: anything that does not have the expected shape is
//! skipped instead of failing the whole report.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::models::{AuditRef, RawAudit, RawAuditReport, RawCategory, Score, ScoreDisplayMode};

// ============================================================================
// LIGHTHOUSE RESULT TO RAW AUDIT REPORT
// ============================================================================

impl From<&Value> for RawAuditReport {
    fn from(lighthouse_result: &Value) -> Self {
        let categories = lighthouse_result
            .get("categories")
            .and_then(Value::as_object)
            .map(decode_categories)
            .unwrap_or_default();

        let audits = lighthouse_result
            .get("audits")
            .and_then(Value::as_object)
            .map(decode_audits)
            .unwrap_or_default();

        Self { categories, audits }
    }
}

fn decode_categories(raw: &Map<String, Value>) -> Vec<RawCategory> {
    raw.iter()
        .filter_map(|(key, value)| {
            let category = value.as_object()?;
            let audit_refs = category
                .get("auditRefs")
                .and_then(Value::as_array)
                .map(|refs| refs.iter().filter_map(decode_audit_ref).collect())
                .unwrap_or_default();

            Some(RawCategory {
                key: key.clone(),
                score: category.get("score").and_then(decode_score),
                audit_refs,
            })
        })
        .collect()
}

fn decode_audit_ref(value: &Value) -> Option<AuditRef> {
    let id = value.get("id")?.as_str()?;
    Some(AuditRef {
        id: id.to_string(),
        group: value.get("group").and_then(Value::as_str).map(str::to_string),
    })
}

fn decode_audits(raw: &Map<String, Value>) -> HashMap<String, RawAudit> {
    raw.iter()
        .filter_map(|(id, value)| {
            let audit = value.as_object()?;
            let mode = audit
                .get("scoreDisplayMode")
                .and_then(Value::as_str)
                .map(ScoreDisplayMode::parse)
                .unwrap_or_else(|| ScoreDisplayMode::Other(String::new()));

            Some((
                id.clone(),
                RawAudit {
                    id: id.clone(),
                    title: string_field(audit, "title"),
                    description: string_field(audit, "description"),
                    score: audit.get("score").and_then(decode_score),
                    score_display_mode: mode,
                    display_value: string_field(audit, "displayValue"),
                },
            ))
        })
        .collect()
}

fn decode_score(value: &Value) -> Option<Score> {
    value.as_f64().filter(|v| v.is_finite()).map(Score::from)
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

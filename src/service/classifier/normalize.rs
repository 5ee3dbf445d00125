//! Turns a classified audit into a display-ready finding.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{Bucket, ClassifiedAudit, Finding, RawAudit, Severity};

/// Human-readable labels for Lighthouse category keys.
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("performance", "Performance"),
    ("seo", "SEO"),
    ("accessibility", "Accesibilidad"),
    ("best-practices", "Best Practices"),
];

pub const FALLBACK_CATEGORY_LABEL: &str = "General";

pub const PASSED_FALLBACK: &str = "This check passed.";
pub const ATTENTION_FALLBACK: &str = "This check needs attention.";
pub const INFO_FALLBACK: &str = "This is informational context.";

pub fn category_label(key: &str) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(FALLBACK_CATEGORY_LABEL)
}

/// Reduce markdown links `[text](url)` to their text. The url may contain
/// one level of balanced parentheses.
pub fn strip_links(text: &str) -> String {
    static LINK: OnceLock<Regex> = OnceLock::new();
    let link = LINK.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\((?:[^()]|\([^()]*\))*\)").expect("link pattern is valid")
    });
    link.replace_all(text, "$1").into_owned()
}

pub fn severity_for(bucket: Bucket, score: Option<f64>) -> Severity {
    match bucket {
        Bucket::Good => Severity::Pass,
        Bucket::Info => Severity::Info,
        Bucket::Bad | Bucket::Excluded => match score {
            Some(s) if s <= 0.5 => Severity::Critical,
            Some(s) if s < 0.9 => Severity::High,
            _ => Severity::Medium,
        },
    }
}

fn fallback_description(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Good => PASSED_FALLBACK,
        Bucket::Info => INFO_FALLBACK,
        Bucket::Bad | Bucket::Excluded => ATTENTION_FALLBACK,
    }
}

pub fn normalize(classified: &ClassifiedAudit, audit: &RawAudit) -> Finding {
    let title = match audit.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => classified.audit_id.clone(),
    };

    let stripped = strip_links(audit.description.as_deref().unwrap_or_default());
    let description = match stripped.trim() {
        "" => fallback_description(classified.bucket).to_string(),
        text => text.to_string(),
    };

    let severity = severity_for(classified.bucket, classified.score.map(|s| s.raw()));

    Finding {
        category: category_label(&classified.category_key).to_string(),
        title,
        description,
        display_value: audit.display_value.clone().unwrap_or_default(),
        severity,
        emoji: severity.emoji().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Score, ScoreDisplayMode};

    fn audit(title: Option<&str>, description: Option<&str>) -> RawAudit {
        RawAudit {
            id: "render-blocking-resources".into(),
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            score: Some(Score(0.3)),
            score_display_mode: ScoreDisplayMode::Numeric,
            display_value: Some("Potential savings of 1,200 ms".into()),
        }
    }

    fn classified(bucket: Bucket, category: &str, score: Option<f64>) -> ClassifiedAudit {
        ClassifiedAudit {
            audit_id: "render-blocking-resources".into(),
            category_key: category.into(),
            bucket,
            score: score.map(Score),
        }
    }

    #[test]
    fn labels_known_and_unknown_categories() {
        assert_eq!(category_label("performance"), "Performance");
        assert_eq!(category_label("accessibility"), "Accesibilidad");
        assert_eq!(category_label("best-practices"), "Best Practices");
        assert_eq!(category_label("pwa"), "General");
    }

    #[test]
    fn strips_markdown_links_to_text() {
        let text = "Resources are blocking. [Learn how to fix it](https://developer.chrome.com/docs). Also [see this](https://x.y/z).";
        assert_eq!(
            strip_links(text),
            "Resources are blocking. Learn how to fix it. Also see this."
        );
        assert_eq!(strip_links("no links here"), "no links here");
    }

    #[test]
    fn strips_links_with_parenthesized_urls() {
        let text = "See [Foo](https://en.wikipedia.org/wiki/Foo_(bar)) and [baz](https://x.y/(a)/(b)).";
        assert_eq!(strip_links(text), "See Foo and baz.");
        assert_eq!(strip_links("Keep (this) [text](https://x.y)"), "Keep (this) text");
    }

    #[test]
    fn severity_thresholds_for_bad_bucket() {
        assert_eq!(severity_for(Bucket::Bad, Some(0.0)), Severity::Critical);
        assert_eq!(severity_for(Bucket::Bad, Some(0.5)), Severity::Critical);
        assert_eq!(severity_for(Bucket::Bad, Some(0.51)), Severity::High);
        assert_eq!(severity_for(Bucket::Bad, Some(0.89)), Severity::High);
        assert_eq!(severity_for(Bucket::Bad, Some(0.9)), Severity::Medium);
        assert_eq!(severity_for(Bucket::Good, Some(1.0)), Severity::Pass);
        assert_eq!(severity_for(Bucket::Info, None), Severity::Info);
    }

    #[test]
    fn normalizes_full_audit() {
        let finding = normalize(
            &classified(Bucket::Bad, "performance", Some(0.3)),
            &audit(
                Some("Eliminate render-blocking resources"),
                Some("  Resources are blocking the first paint. [Learn more](https://web.dev/)  "),
            ),
        );

        assert_eq!(finding.category, "Performance");
        assert_eq!(finding.title, "Eliminate render-blocking resources");
        assert_eq!(finding.description, "Resources are blocking the first paint. Learn more");
        assert_eq!(finding.display_value, "Potential savings of 1,200 ms");
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.emoji, "🔴");
    }

    #[test]
    fn falls_back_to_id_and_bucket_sentence() {
        let finding = normalize(&classified(Bucket::Good, "seo", Some(1.0)), &audit(Some("  "), None));
        assert_eq!(finding.title, "render-blocking-resources");
        assert_eq!(finding.description, PASSED_FALLBACK);

        let finding = normalize(&classified(Bucket::Bad, "seo", Some(0.7)), &audit(None, Some("[](https://only.link)")));
        assert_eq!(finding.description, ATTENTION_FALLBACK);
        assert_eq!(finding.severity, Severity::High);

        let finding = normalize(&classified(Bucket::Info, "seo", None), &audit(None, Some("")));
        assert_eq!(finding.description, INFO_FALLBACK);
        assert_eq!(finding.emoji, "ℹ️");
    }
}

//! Audit classification and ranking engine.
//!
//! The pipeline runs in four steps:
//! - **index**: map every referenced audit to its owning category
//! - **classify**: decide good / bad / info / excluded per audit
//! - **normalize**: build a display-ready `Finding`
//! - **ranking**: sort and cap each bucket
//!
//! Audits that no category references never reach the output.

mod classify;
mod index;
mod normalize;
mod ranking;

pub use classify::{bucket_for, classify, GOOD_THRESHOLD};
pub use index::AuditIndex;
pub use normalize::{category_label, normalize, severity_for, strip_links};
pub use ranking::rank;

use crate::domain::models::{Bucket, Finding, RankedFindings, RawAuditReport, Severity};

/// Ranked good / bad / info buckets for one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedFindings {
    pub bad: RankedFindings,
    pub good: RankedFindings,
    pub info: RankedFindings,
    pub has_critical_issues: bool,
}

pub fn classify_report(report: &RawAuditReport) -> ClassifiedFindings {
    let index = AuditIndex::build(&report.categories);
    if index.is_empty() {
        tracing::debug!("[CLASSIFY] No category references any audit");
        return ClassifiedFindings::default();
    }

    let mut bad: Vec<Finding> = Vec::new();
    let mut good: Vec<Finding> = Vec::new();
    let mut info: Vec<Finding> = Vec::new();
    let mut missing = 0usize;

    for entry in index.iter() {
        let Some(audit) = report.audit(&entry.audit_id) else {
            missing += 1;
            continue;
        };

        let classified = classify(audit, entry);
        let bucket = match classified.bucket {
            Bucket::Bad => &mut bad,
            Bucket::Good => &mut good,
            Bucket::Info => &mut info,
            Bucket::Excluded => continue,
        };
        bucket.push(normalize(&classified, audit));
    }

    let has_critical_issues = bad.iter().any(|f| f.severity == Severity::Critical);

    tracing::debug!(
        "[CLASSIFY] {} indexed audits ({} missing): {} bad, {} good, {} info",
        index.len(),
        missing,
        bad.len(),
        good.len(),
        info.len()
    );

    ClassifiedFindings {
        bad: rank(bad, Bucket::Bad),
        good: rank(good, Bucket::Good),
        info: rank(info, Bucket::Info),
        has_critical_issues,
    }
}

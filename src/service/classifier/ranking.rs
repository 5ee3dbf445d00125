//! Ordering and truncation of finding buckets.

use std::cmp::Ordering;

use crate::domain::models::{Bucket, Finding, RankedFindings};
use crate::service::naming::locale_cmp;

fn by_category_then_title(a: &Finding, b: &Finding) -> Ordering {
    locale_cmp(&a.category, &b.category).then_with(|| locale_cmp(&a.title, &b.title))
}

/// Sort `findings` for `bucket` (stable) and keep the first N.
///
/// Bad findings are ordered by severity rank first; all buckets then order
/// by category label and title.
pub fn rank(mut findings: Vec<Finding>, bucket: Bucket) -> RankedFindings {
    match bucket {
        Bucket::Bad => findings.sort_by(|a, b| {
            a.severity
                .rank()
                .cmp(&b.severity.rank())
                .then_with(|| by_category_then_title(a, b))
        }),
        _ => findings.sort_by(by_category_then_title),
    }

    let count = findings.len();
    findings.truncate(bucket.display_cap());
    RankedFindings { items: findings, count }
}

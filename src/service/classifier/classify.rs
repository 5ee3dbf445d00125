//! Bucket decision for a single audit.

use crate::domain::models::{AuditIndexEntry, Bucket, ClassifiedAudit, RawAudit, Score, ScoreDisplayMode};

/// Numeric audits at or above this score count as passed.
pub const GOOD_THRESHOLD: f64 = 0.9;

/// Decide the bucket for a display mode and score.
///
/// Precedence: not-applicable/manual are dropped, informative audits are
/// advisory regardless of score, unscored audits are dropped, binary audits
/// pass only with a full score, everything else uses the 0.9 cutoff.
pub fn bucket_for(mode: &ScoreDisplayMode, score: Option<Score>) -> Bucket {
    match mode {
        ScoreDisplayMode::NotApplicable | ScoreDisplayMode::Manual => return Bucket::Excluded,
        ScoreDisplayMode::Informative => return Bucket::Info,
        _ => {}
    }

    let Some(score) = score else {
        return Bucket::Excluded;
    };

    let passed = match mode {
        ScoreDisplayMode::Binary => score.raw() >= 1.0,
        _ => score.raw() >= GOOD_THRESHOLD,
    };

    if passed {
        Bucket::Good
    } else {
        Bucket::Bad
    }
}

pub fn classify(audit: &RawAudit, entry: &AuditIndexEntry) -> ClassifiedAudit {
    ClassifiedAudit {
        audit_id: audit.id.clone(),
        category_key: entry.category_key.clone(),
        bucket: bucket_for(&audit.score_display_mode, audit.score),
        score: audit.score,
    }
}

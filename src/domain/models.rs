//! Rich domain entities - behavior lives WITH data

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ====== Scores ======

/// Wrapper type for scores, storing a raw 0.0-1.0 value and helpers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Score(pub f64);

impl Score {
    /// Return the raw 0.0-1.0 value
    pub fn raw(&self) -> f64 {
        self.0
    }

    /// Whole-number percentage (0 - 100), rounded half up.
    pub fn integer(&self) -> u8 {
        (self.0 * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

// ====== Raw input (Lighthouse result) ======

/// How Lighthouse wants an audit's score to be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreDisplayMode {
    Binary,
    Numeric,
    Informative,
    NotApplicable,
    Manual,
    Error,
    Other(String),
}

impl ScoreDisplayMode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "binary" => Self::Binary,
            "numeric" => Self::Numeric,
            "informative" => Self::Informative,
            "notApplicable" => Self::NotApplicable,
            "manual" => Self::Manual,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "binary",
            Self::Numeric => "numeric",
            Self::Informative => "informative",
            Self::NotApplicable => "notApplicable",
            Self::Manual => "manual",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }
}

/// One `{id, group}` entry of a category's `auditRefs`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRef {
    pub id: String,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawCategory {
    pub key: String,
    pub score: Option<Score>,
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawAudit {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub score: Option<Score>,
    pub score_display_mode: ScoreDisplayMode,
    pub display_value: Option<String>,
}

/// The parts of a Lighthouse result the classifier understands.
///
/// Categories keep the order they had in the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAuditReport {
    pub categories: Vec<RawCategory>,
    pub audits: HashMap<String, RawAudit>,
}

impl RawAuditReport {
    pub fn category(&self, key: &str) -> Option<&RawCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn audit(&self, id: &str) -> Option<&RawAudit> {
        self.audits.get(id)
    }

    /// Category score as a whole percentage; absent categories or scores are 0.
    pub fn category_percent(&self, key: &str) -> u8 {
        self.category(key)
            .and_then(|c| c.score)
            .map(|s| s.integer())
            .unwrap_or(0)
    }
}

// ====== Classification ======

/// Owning category (and group) of a single audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditIndexEntry {
    pub audit_id: String,
    pub category_key: String,
    pub group_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Good,
    Bad,
    Info,
    Excluded,
}

impl Bucket {
    /// Maximum number of findings kept for presentation.
    pub fn display_cap(&self) -> usize {
        match self {
            Bucket::Bad => 14,
            Bucket::Good => 12,
            Bucket::Info => 10,
            Bucket::Excluded => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedAudit {
    pub audit_id: String,
    pub category_key: String,
    pub bucket: Bucket,
    pub score: Option<Score>,
}

// ====== Findings ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Critical,
    High,
    Medium,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Pass => "pass",
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Info => "info",
        }
    }

    /// Sort rank inside the bad bucket; anything that is not a failure sorts last.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            _ => 9,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::High => "🟠",
            Severity::Pass => "✅",
            Severity::Info => "ℹ️",
            Severity::Medium => "🟡",
        }
    }
}

/// Display-ready representation of one classified audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub category: String,
    pub title: String,
    pub description: String,
    pub display_value: String,
    pub severity: Severity,
    pub emoji: String,
}

/// A ranked, capped bucket together with its size before truncation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedFindings {
    pub items: Vec<Finding>,
    pub count: usize,
}

// ====== Metrics ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warn,
    Bad,
    Neutral,
}

impl MetricStatus {
    pub fn from_score(score: Option<Score>) -> Self {
        match score.map(|s| s.raw()) {
            None => MetricStatus::Neutral,
            Some(s) if s >= 0.9 => MetricStatus::Good,
            Some(s) if s >= 0.5 => MetricStatus::Warn,
            Some(_) => MetricStatus::Bad,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Good => "good",
            MetricStatus::Warn => "warn",
            MetricStatus::Bad => "bad",
            MetricStatus::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricItem {
    pub key: String,
    pub label: String,
    pub value: String,
    pub status: MetricStatus,
}

// ====== Grade ======

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Grade for a performance percentage; lower bounds are inclusive.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            90.. => Grade::A,
            75..=89 => Grade::B,
            50..=74 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A - Excellent",
            Grade::B => "B - Good",
            Grade::C => "C - Needs improvement",
            Grade::D => "D - Critical",
        }
    }
}

impl Serialize for Grade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

// ====== Aggregates ======

/// Category scores as whole percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScores {
    pub performance: u8,
    pub seo: u8,
    pub accessibility: u8,
    pub best_practices: u8,
}

/// Everything the pipeline derives from one audit report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReport {
    pub scores: CategoryScores,
    pub grade: Grade,
    pub bad: RankedFindings,
    pub good: RankedFindings,
    pub info: RankedFindings,
    pub has_critical_issues: bool,
    pub metrics: Vec<MetricItem>,
    pub metrics_map: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
}

/// Request metadata carried through to the output untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    pub client: ClientInfo,
    pub site: SiteInfo,
    pub report_date: String,
    pub timestamp: i64,
}

/// Final output aggregate, serialized in the flattened shape the report
/// generator consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub performance_score: u8,
    pub seo_score: u8,
    pub accessibility_score: u8,
    pub best_practices_score: u8,
    pub performance_grade: Grade,
    pub has_critical_issues: bool,
    pub metrics: BTreeMap<String, String>,
    pub speed_metrics: Vec<MetricItem>,
    pub bad_points: Vec<Finding>,
    pub good_points: Vec<Finding>,
    pub info_points: Vec<Finding>,
    pub bad_points_count: usize,
    pub good_points_count: usize,
    pub info_points_count: usize,
    pub client: ClientInfo,
    pub site: SiteInfo,
    pub report_date: String,
    pub timestamp: i64,
}

impl ReportSummary {
    pub fn new(report: ProcessedReport, meta: ReportMetadata) -> Self {
        Self {
            performance_score: report.scores.performance,
            seo_score: report.scores.seo,
            accessibility_score: report.scores.accessibility,
            best_practices_score: report.scores.best_practices,
            performance_grade: report.grade,
            has_critical_issues: report.has_critical_issues,
            metrics: report.metrics_map,
            speed_metrics: report.metrics,
            bad_points: report.bad.items,
            good_points: report.good.items,
            info_points: report.info.items,
            bad_points_count: report.bad.count,
            good_points_count: report.good.count,
            info_points_count: report.info.count,
            client: meta.client,
            site: meta.site,
            report_date: meta.report_date,
            timestamp: meta.timestamp,
        }
    }
}

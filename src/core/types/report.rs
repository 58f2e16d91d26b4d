use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

/// Pass/fail outcome, for a single bucket or the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

/// One declared bucket's evaluation against its expected range.
#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub name: String,
    pub count: u64,
    /// Truncating integer percentage of the full request total.
    pub percent: u64,
    pub min: u8,
    pub max: u8,
    pub verdict: Verdict,
}

/// Final result of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub target: String,
    pub total: u64,
    pub buckets: Vec<BucketReport>,
    pub unclassified: u64,
    pub errors: u64,
    pub elapsed_ms: u64,
    pub verdict: Verdict,
}

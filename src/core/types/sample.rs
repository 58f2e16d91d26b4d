use serde::Serialize;

use crate::types::bucket;

/// Classification outcome for a single sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleLabel {
    /// Matched a declared bucket.
    Bucket(String),
    /// Response received but no bucket pattern matched.
    Unclassified,
    /// Request failed (network, timeout, refused connection).
    Error,
}

impl SampleLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SampleLabel::Bucket(name) => name,
            SampleLabel::Unclassified => bucket::UNCLASSIFIED,
            SampleLabel::Error => bucket::ERROR,
        }
    }
}

/// One observation from the sampling loop.
#[derive(Debug, Clone, Serialize)]
pub struct SampleResult {
    /// Zero-based request sequence number.
    pub seq: u32,
    /// HTTP status, None when the request failed.
    pub status: Option<u16>,
    pub body: String,
    pub elapsed_ms: u64,
    pub label: SampleLabel,
}

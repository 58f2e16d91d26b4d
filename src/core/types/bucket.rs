use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{AppError, AppResult};

/// Tally entry for responses no declared bucket matched.
pub const UNCLASSIFIED: &str = "unclassified";
/// Tally entry for requests that failed outright.
pub const ERROR: &str = "error";

/// A named traffic category: ordered substring patterns that identify a
/// response as belonging to it, and an inclusive expected percentage range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    /// A response belongs to this bucket if any pattern occurs in its body.
    #[serde(default)]
    pub patterns: Vec<String>,
    pub min: u8,
    pub max: u8,
}

impl Bucket {
    /// True for the reserved names that bind an expected range to a
    /// synthetic counter instead of matching response bodies.
    pub fn is_synthetic_alias(&self) -> bool {
        self.name == UNCLASSIFIED || self.name == ERROR
    }

    pub fn matches(&self, body: &str) -> bool {
        self.patterns.iter().any(|pattern| body.contains(pattern))
    }

    /// Parse a CLI bucket spec: `name:pattern[|pattern...]:min:max`.
    /// Patterns may contain `:`; the name is taken from the first colon
    /// and the range from the last two.
    pub fn parse_spec(spec: &str) -> AppResult<Self> {
        let malformed =
            || AppError::Config(format!("malformed bucket spec '{spec}': expected name:pattern:min:max"));

        let (name, rest) = spec.split_once(':').ok_or_else(malformed)?;
        let (rest, max_str) = rest.rsplit_once(':').ok_or_else(malformed)?;
        let (patterns_str, min_str) = rest.rsplit_once(':').ok_or_else(malformed)?;

        let min = min_str.trim().parse::<u8>().map_err(|_| {
            AppError::Config(format!("invalid min percentage '{min_str}' in bucket spec '{spec}'"))
        })?;
        let max = max_str.trim().parse::<u8>().map_err(|_| {
            AppError::Config(format!("invalid max percentage '{max_str}' in bucket spec '{spec}'"))
        })?;

        let patterns: Vec<String> = patterns_str
            .split('|')
            .map(str::to_string)
            .filter(|p| !p.is_empty())
            .collect();

        let bucket = Bucket {
            name: name.trim().to_string(),
            patterns,
            min,
            max,
        };
        bucket.validate()?;
        Ok(bucket)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_empty() {
            return Err(AppError::Config("bucket name is empty".to_string()));
        }
        if self.max > 100 {
            return Err(AppError::Config(format!(
                "bucket '{}': max percentage {} exceeds 100",
                self.name, self.max
            )));
        }
        if self.min > self.max {
            return Err(AppError::Config(format!(
                "bucket '{}': min percentage {} exceeds max {}",
                self.name, self.min, self.max
            )));
        }
        if self.patterns.is_empty() && !self.is_synthetic_alias() {
            return Err(AppError::Config(format!(
                "bucket '{}' declares no patterns",
                self.name
            )));
        }
        Ok(())
    }
}

/// Validate a declared bucket list. Overlapping patterns across buckets are
/// flagged with a warning only: classification is first-match, so the
/// earlier-declared bucket wins.
pub fn validate_buckets(buckets: &[Bucket]) -> AppResult<()> {
    if buckets.is_empty() {
        return Err(AppError::Config(
            "at least one bucket must be declared".to_string(),
        ));
    }

    for bucket in buckets {
        bucket.validate()?;
    }

    for (i, bucket) in buckets.iter().enumerate() {
        for other in &buckets[i + 1..] {
            if bucket.name == other.name {
                return Err(AppError::Config(format!(
                    "bucket '{}' is declared more than once",
                    bucket.name
                )));
            }
        }
    }

    for (i, earlier) in buckets.iter().enumerate() {
        for later in &buckets[i + 1..] {
            for ep in &earlier.patterns {
                for lp in &later.patterns {
                    if lp.contains(ep.as_str()) || ep.contains(lp.as_str()) {
                        warn!(
                            "Buckets '{}' and '{}' have overlapping patterns ('{}' vs '{}'); '{}' is checked first and wins",
                            earlier.name, later.name, ep, lp, earlier.name
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

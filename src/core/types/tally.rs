use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::types::{Bucket, SampleLabel, bucket};

/// Running per-bucket counters for one validation run.
///
/// `record` increments exactly one counter atomically, so samples recorded
/// from concurrent workers are never lost or double-counted. The baseline
/// sampler is sequential and simply gets the same guarantee for free. A
/// Tally starts empty and nothing survives across runs.
#[derive(Debug)]
pub struct Tally {
    names: Vec<String>,
    counts: Vec<AtomicU64>,
    unclassified: AtomicU64,
    errors: AtomicU64,
}

impl Tally {
    /// Build an empty tally keyed by the declared bucket names. Reserved
    /// names map onto the synthetic counters and get no slot of their own.
    pub fn new(buckets: &[Bucket]) -> Self {
        let names: Vec<String> = buckets
            .iter()
            .filter(|b| !b.is_synthetic_alias())
            .map(|b| b.name.clone())
            .collect();
        let counts = names.iter().map(|_| AtomicU64::new(0)).collect();
        Tally {
            names,
            counts,
            unclassified: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    /// Increment exactly one counter for this label.
    pub fn record(&self, label: &SampleLabel) {
        match label {
            SampleLabel::Bucket(name) => {
                if let Some(idx) = self.names.iter().position(|n| n == name) {
                    self.counts[idx].fetch_add(1, Ordering::Relaxed);
                } else {
                    // a label the tally was not keyed with still counts
                    self.unclassified.fetch_add(1, Ordering::Relaxed);
                }
            }
            SampleLabel::Unclassified => {
                self.unclassified.fetch_add(1, Ordering::Relaxed);
            }
            SampleLabel::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Read-only view of the counters. `total` is computed as the sum of
    /// everything read, so `total == sum(counts)` holds by construction.
    pub fn snapshot(&self) -> TallySnapshot {
        let counts: Vec<(String, u64)> = self
            .names
            .iter()
            .zip(&self.counts)
            .map(|(name, count)| (name.clone(), count.load(Ordering::Relaxed)))
            .collect();
        let unclassified = self.unclassified.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        let total = counts.iter().map(|(_, c)| c).sum::<u64>() + unclassified + errors;

        TallySnapshot {
            counts,
            unclassified,
            errors,
            total,
        }
    }
}

/// Finalized counts handed to the validator.
#[derive(Debug, Clone, Serialize)]
pub struct TallySnapshot {
    pub counts: Vec<(String, u64)>,
    pub unclassified: u64,
    pub errors: u64,
    pub total: u64,
}

impl TallySnapshot {
    /// Count for a bucket name; reserved names read the synthetic counters.
    pub fn count_for(&self, name: &str) -> u64 {
        if name == bucket::UNCLASSIFIED {
            return self.unclassified;
        }
        if name == bucket::ERROR {
            return self.errors;
        }
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_buckets() -> Vec<Bucket> {
        vec![
            Bucket {
                name: "blue".to_string(),
                patterns: vec!["blue".to_string()],
                min: 60,
                max: 80,
            },
            Bucket {
                name: "green".to_string(),
                patterns: vec!["green".to_string()],
                min: 20,
                max: 40,
            },
        ]
    }

    #[test]
    fn total_equals_sum_of_counts() {
        let tally = Tally::new(&two_buckets());
        for _ in 0..14 {
            tally.record(&SampleLabel::Bucket("blue".to_string()));
        }
        for _ in 0..3 {
            tally.record(&SampleLabel::Unclassified);
        }
        for _ in 0..3 {
            tally.record(&SampleLabel::Error);
        }

        let snapshot = tally.snapshot();
        assert_eq!(snapshot.total, 20);
        assert_eq!(snapshot.count_for("blue"), 14);
        assert_eq!(snapshot.count_for("green"), 0);
        assert_eq!(snapshot.unclassified, 3);
        assert_eq!(snapshot.errors, 3);
    }

    #[test]
    fn unknown_label_counts_as_unclassified() {
        let tally = Tally::new(&two_buckets());
        tally.record(&SampleLabel::Bucket("red".to_string()));
        let snapshot = tally.snapshot();
        assert_eq!(snapshot.unclassified, 1);
        assert_eq!(snapshot.total, 1);
    }

    #[test]
    fn concurrent_recording_loses_nothing() {
        let tally = Tally::new(&two_buckets());
        let per_thread: u64 = 1000;
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for i in 0..per_thread {
                        let label = if i % 2 == 0 {
                            SampleLabel::Bucket("blue".to_string())
                        } else {
                            SampleLabel::Bucket("green".to_string())
                        };
                        tally.record(&label);
                    }
                });
            }
        });

        let snapshot = tally.snapshot();
        assert_eq!(snapshot.total, 4 * per_thread);
        assert_eq!(snapshot.count_for("blue"), 2 * per_thread);
        assert_eq!(snapshot.count_for("green"), 2 * per_thread);
    }

    #[test]
    fn reserved_names_get_no_slot() {
        let mut buckets = two_buckets();
        buckets.push(Bucket {
            name: "error".to_string(),
            patterns: vec![],
            min: 0,
            max: 10,
        });
        let tally = Tally::new(&buckets);
        tally.record(&SampleLabel::Error);
        let snapshot = tally.snapshot();
        assert_eq!(snapshot.count_for("error"), 1);
        assert_eq!(snapshot.total, 1);
    }
}

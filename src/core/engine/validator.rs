use chrono::Utc;

use crate::types::{
    AppError, AppResult, Bucket, BucketReport, Report, TallySnapshot, Verdict,
};

/// Truncating integer percentage (2 of 3 is 66, not 67), matching how the
/// report consumers round elsewhere. Caller guarantees total > 0.
fn percent(count: u64, total: u64) -> u64 {
    count * 100 / total
}

/// Compare a finalized tally against the declared expected ranges.
///
/// The denominator is always the full issued-request total, error samples
/// included. Unclassified and error counts are reported but participate in
/// pass/fail only when a bucket with the reserved name was declared.
pub fn validate(
    snapshot: &TallySnapshot,
    buckets: &[Bucket],
    target: &str,
    elapsed_ms: u64,
) -> AppResult<Report> {
    if snapshot.total == 0 {
        return Err(AppError::Config("no samples collected".to_string()));
    }

    let mut rows = Vec::with_capacity(buckets.len());
    let mut all_passed = true;

    for bucket in buckets {
        let count = snapshot.count_for(&bucket.name);
        let pct = percent(count, snapshot.total);
        let passed = pct >= bucket.min as u64 && pct <= bucket.max as u64;
        all_passed &= passed;

        rows.push(BucketReport {
            name: bucket.name.clone(),
            count,
            percent: pct,
            min: bucket.min,
            max: bucket.max,
            verdict: if passed { Verdict::Pass } else { Verdict::Fail },
        });
    }

    Ok(Report {
        generated_at: Utc::now(),
        target: target.to_string(),
        total: snapshot.total,
        buckets: rows,
        unclassified: snapshot.unclassified,
        errors: snapshot.errors,
        elapsed_ms,
        verdict: if all_passed { Verdict::Pass } else { Verdict::Fail },
    })
}

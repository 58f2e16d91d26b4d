use crate::types::{Bucket, SampleLabel};

/// First-match classification: the earliest declared bucket with any
/// pattern found in the body wins, even when later buckets would also
/// match. Reserved-name buckets never match bodies.
pub fn classify(body: &str, buckets: &[Bucket]) -> SampleLabel {
    for bucket in buckets {
        if bucket.is_synthetic_alias() {
            continue;
        }
        if bucket.matches(body) {
            return SampleLabel::Bucket(bucket.name.clone());
        }
    }
    SampleLabel::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str, patterns: &[&str]) -> Bucket {
        Bucket {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            min: 0,
            max: 100,
        }
    }

    #[test]
    fn matches_by_substring() {
        let buckets = vec![bucket("blue", &["backend-blue"]), bucket("green", &["backend-green"])];
        assert_eq!(
            classify("served by backend-green (v2)", &buckets),
            SampleLabel::Bucket("green".to_string())
        );
    }

    #[test]
    fn first_declared_bucket_wins_on_overlap() {
        // both patterns occur in the body; declaration order decides
        let buckets = vec![bucket("blue", &["backend"]), bucket("green", &["backend-green"])];
        assert_eq!(
            classify("served by backend-green", &buckets),
            SampleLabel::Bucket("blue".to_string())
        );

        let reversed = vec![bucket("green", &["backend-green"]), bucket("blue", &["backend"])];
        assert_eq!(
            classify("served by backend-green", &reversed),
            SampleLabel::Bucket("green".to_string())
        );
    }

    #[test]
    fn any_pattern_in_the_set_matches() {
        let buckets = vec![bucket("green", &["candidate", "v2"])];
        assert_eq!(
            classify("release v2 rollout", &buckets),
            SampleLabel::Bucket("green".to_string())
        );
    }

    #[test]
    fn no_match_is_unclassified() {
        let buckets = vec![bucket("blue", &["backend-blue"])];
        assert_eq!(classify("hello world", &buckets), SampleLabel::Unclassified);
    }

    #[test]
    fn synthetic_alias_buckets_never_match() {
        let mut error_bucket = bucket("error", &[]);
        error_bucket.patterns = vec!["anything".to_string()];
        let buckets = vec![error_bucket, bucket("blue", &["anything"])];
        assert_eq!(
            classify("anything at all", &buckets),
            SampleLabel::Bucket("blue".to_string())
        );
    }
}

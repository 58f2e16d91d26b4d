use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::core::engine::classifier::classify;
use crate::core::engine::traits::RequestExecutor;
use crate::types::{Bucket, SampleLabel, SampleResult, Tally, Target};

/// Sequential sampling loop: N requests against one target, a fixed delay
/// between consecutive requests, each outcome classified and recorded
/// before the next request is issued. No retries on individual failures.
pub struct Sampler<E> {
    executor: E,
    count: u32,
    delay: Duration,
}

impl<E: RequestExecutor> Sampler<E> {
    pub fn new(executor: E, count: u32, delay: Duration) -> Self {
        Sampler {
            executor,
            count,
            delay,
        }
    }

    /// Issue the configured number of requests. A failed request becomes an
    /// "error" sample and the loop continues; only the running flag stops
    /// it early (between samples). Returns one result per issued request,
    /// in issuance order.
    pub async fn collect<F>(
        &self,
        target: &Target,
        buckets: &[Bucket],
        tally: &Tally,
        running: &Arc<AtomicBool>,
        mut on_sample: F,
    ) -> Vec<SampleResult>
    where
        F: FnMut(&SampleResult),
    {
        let mut results = Vec::with_capacity(self.count as usize);

        for seq in 0..self.count {
            if !running.load(Ordering::SeqCst) {
                warn!("Sampling interrupted after {} of {} requests", seq, self.count);
                break;
            }

            let started = Instant::now();
            let result = match self.executor.get(target).await {
                Ok(response) => {
                    let label = classify(&response.body, buckets);
                    SampleResult {
                        seq,
                        status: Some(response.status),
                        body: response.body,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                        label,
                    }
                }
                Err(err) => {
                    debug!("Request {} failed: {err}", seq + 1);
                    SampleResult {
                        seq,
                        status: None,
                        body: String::new(),
                        elapsed_ms: started.elapsed().as_millis() as u64,
                        label: SampleLabel::Error,
                    }
                }
            };

            tally.record(&result.label);
            on_sample(&result);
            results.push(result);

            // fixed pacing between consecutive requests, none after the last
            if seq + 1 < self.count && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::traits::{RequestError, Response};

    struct FixedExecutor {
        body: &'static str,
    }

    impl RequestExecutor for FixedExecutor {
        async fn get(&self, _target: &Target) -> Result<Response, RequestError> {
            Ok(Response {
                status: 200,
                body: self.body.to_string(),
            })
        }
    }

    fn blue_bucket() -> Bucket {
        Bucket {
            name: "blue".to_string(),
            patterns: vec!["blue".to_string()],
            min: 0,
            max: 100,
        }
    }

    #[test]
    fn produces_exactly_count_samples() {
        let buckets = vec![blue_bucket()];
        let sampler = Sampler::new(FixedExecutor { body: "blue" }, 7, Duration::ZERO);
        let tally = Tally::new(&buckets);
        let running = Arc::new(AtomicBool::new(true));
        let target = Target::parse("10.0.1.10").unwrap();

        let results = tokio_test::block_on(sampler.collect(
            &target,
            &buckets,
            &tally,
            &running,
            |_| {},
        ));

        assert_eq!(results.len(), 7);
        let snapshot = tally.snapshot();
        assert_eq!(snapshot.total, 7);
        assert_eq!(snapshot.count_for("blue"), 7);
    }
}

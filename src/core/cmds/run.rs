use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::core::cli::RunArgs;
use crate::core::engine::http::HttpExecutor;
use crate::core::engine::sampler::Sampler;
use crate::core::engine::validator::validate;
use crate::types::config::colors_enabled;
use crate::types::{AppError, AppResult, Bucket, Report, Tally, Target, Verdict, bucket};

/// Sample the target, validate the observed split, and render the report.
/// Returns None when the run was interrupted before completing.
pub async fn execute_run(
    args: RunArgs,
    target: Target,
    buckets: Vec<Bucket>,
    count: u32,
    delay: Duration,
    timeout: Duration,
    running: Arc<AtomicBool>,
) -> AppResult<Option<Report>> {
    if count == 0 {
        return Err(AppError::Config(
            "request count must be positive".to_string(),
        ));
    }

    info!(
        "Sampling {} request(s) against {} ({:?} between requests)",
        count, target, delay
    );

    let executor = HttpExecutor::new(timeout).map_err(|e| AppError::Custom(e.to_string()))?;
    let sampler = Sampler::new(executor, count, delay);
    let tally = Tally::new(&buckets);

    let progress = if args.verbose {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(count as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let verbose = args.verbose;
    let started = Instant::now();
    sampler
        .collect(&target, &buckets, &tally, &running, |sample| {
            progress.inc(1);
            if verbose {
                let status = sample
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                info!(
                    "  #{:<3} {:<14} status={:<4} {}ms",
                    sample.seq + 1,
                    sample.label.as_str(),
                    status,
                    sample.elapsed_ms
                );
            }
        })
        .await;
    progress.finish_and_clear();

    if !running.load(Ordering::SeqCst) {
        // interrupted runs produce no report
        return Ok(None);
    }

    let report = validate(
        &tally.snapshot(),
        &buckets,
        &target.to_string(),
        started.elapsed().as_millis() as u64,
    )?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_table(&report, &buckets),
    }

    Ok(Some(report))
}

fn verdict_display(verdict: Verdict) -> String {
    let text = verdict.to_string();
    if !colors_enabled() {
        return text;
    }
    match verdict {
        Verdict::Pass => style(text).green().to_string(),
        Verdict::Fail => style(text).red().to_string(),
    }
}

fn print_table(report: &Report, buckets: &[Bucket]) {
    info!("");
    info!(
        "Traffic split for {} ({} requests, {}ms):",
        report.target, report.total, report.elapsed_ms
    );
    for row in &report.buckets {
        info!(
            "  {:<14} {:>4}  {:>3}%  expected [{}, {}]  {}",
            row.name,
            row.count,
            row.percent,
            row.min,
            row.max,
            verdict_display(row.verdict)
        );
    }

    // synthetic counters that were not declared as buckets are informational
    let declared = |name: &str| buckets.iter().any(|b| b.name == name);
    if !declared(bucket::UNCLASSIFIED) {
        info!("  {:<14} {:>4}  (not evaluated)", bucket::UNCLASSIFIED, report.unclassified);
    }
    if !declared(bucket::ERROR) {
        info!("  {:<14} {:>4}  (not evaluated)", bucket::ERROR, report.errors);
    }

    info!("");
    info!("Overall: {}", verdict_display(report.verdict));
}

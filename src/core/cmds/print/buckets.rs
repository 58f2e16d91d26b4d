use log::info;

use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute(format: String) -> AppResult<()> {
    let buckets = config().buckets();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(());
    }

    if buckets.is_empty() {
        info!("No buckets declared (add [[buckets]] sections to the config file)");
        return Ok(());
    }

    info!("Declared buckets (evaluation order):");
    for (i, bucket) in buckets.iter().enumerate() {
        info!(
            "  {}. {:<14} expected [{}, {}]  patterns: [{}]",
            i + 1,
            bucket.name,
            bucket.min,
            bucket.max,
            bucket.patterns.join(", ")
        );
    }

    Ok(())
}

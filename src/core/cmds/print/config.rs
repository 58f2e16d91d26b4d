use log::info;

use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute(format: String) -> AppResult<()> {
    let effective_config = config().to_effective();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&effective_config)?);
    } else {
        // Table format
        info!("Effective Configuration:");
        info!("");
        info!("Global:");
        match &effective_config.target {
            Some(target) => info!("  target: {}", target),
            None => info!("  target: (not set)"),
        }

        info!("");
        info!("Log:");
        if let Some(log) = &effective_config.log {
            info!("  level: {}", log.level.as_deref().unwrap_or("info"));
            match log.color {
                Some(true) => info!("  color: on"),
                Some(false) => info!("  color: off"),
                None => info!("  color: auto"),
            }
        }

        info!("");
        info!("Sample:");
        if let Some(sample) = &effective_config.sample {
            info!("  count: {}", sample.count());
            info!("  delay_ms: {}", sample.delay_ms());
            info!("  timeout_secs: {}", sample.timeout_secs());
        }

        info!("");
        info!("Buckets:");
        let buckets = effective_config.buckets();
        if buckets.is_empty() {
            info!("  (none declared)");
        } else {
            for bucket in buckets {
                info!(
                    "  - {} [{}, {}] patterns: [{}]",
                    bucket.name,
                    bucket.min,
                    bucket.max,
                    bucket.patterns.join(", ")
                );
            }
        }
    }

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::types::{AppError, AppResult, Bucket, Target, validate_buckets};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SampleConfig {
    pub count: Option<u32>,
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl SampleConfig {
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(20)
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms.unwrap_or(100)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(10)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            count: Some(self.count()),
            delay_ms: Some(self.delay_ms()),
            timeout_secs: Some(self.timeout_secs()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub target: Option<String>,
    pub buckets: Option<Vec<Bucket>>, // ordered, first match wins

    // Nested sections
    pub log: Option<LogConfig>,
    pub sample: Option<SampleConfig>,
}

impl Config {
    pub fn buckets(&self) -> &[Bucket] {
        self.buckets.as_deref().unwrap_or(&[])
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn sample(&self) -> SampleConfig {
        self.sample.clone().unwrap_or_default()
    }

    pub fn to_effective(&self) -> Self {
        Self {
            target: self.target.clone(),
            buckets: Some(self.buckets().to_vec()),
            log: Some(self.log().to_effective()),
            sample: Some(self.sample().to_effective()),
        }
    }

    /// CLI argument wins over the config file; no target anywhere is a
    /// configuration error.
    pub fn resolve_target(&self, cli: Option<&str>) -> AppResult<Target> {
        match cli.or(self.target.as_deref()) {
            Some(addr) => Target::parse(addr),
            None => Err(AppError::Config(
                "no target address provided (pass TARGET or set `target` in the config file)"
                    .to_string(),
            )),
        }
    }

    /// CLI bucket specs replace the config's bucket list entirely.
    pub fn resolve_buckets(&self, cli_specs: &[String]) -> AppResult<Vec<Bucket>> {
        let buckets: Vec<Bucket> = if !cli_specs.is_empty() {
            cli_specs
                .iter()
                .map(|spec| Bucket::parse_spec(spec))
                .collect::<AppResult<_>>()?
        } else {
            self.buckets().to_vec()
        };
        validate_buckets(&buckets)?;
        Ok(buckets)
    }

    pub fn resolve_count(&self, cli: Option<u32>) -> u32 {
        cli.unwrap_or_else(|| self.sample().count())
    }

    /// CLI delay is in (fractional) seconds; the config stores milliseconds.
    pub fn resolve_delay(&self, cli: Option<f64>) -> Duration {
        match cli {
            Some(secs) => Duration::from_millis((secs.max(0.0) * 1000.0) as u64),
            None => Duration::from_millis(self.sample().delay_ms()),
        }
    }

    pub fn resolve_timeout(&self, cli: Option<u64>) -> Duration {
        Duration::from_secs(cli.unwrap_or_else(|| self.sample().timeout_secs()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
}

static CONFIG_FILENAME: OnceCell<String> = OnceCell::new();
static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn set_config_filename(filename: &str) {
    let _ = CONFIG_FILENAME.set(filename.to_string());
}

pub fn get_config_filename() -> &'static str {
    CONFIG_FILENAME
        .get()
        .map(|s| s.as_str())
        .unwrap_or("splitcheck.toml")
}

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    // Merge top-level fields
    if file.target.is_some() {
        cfg.target = file.target.clone();
    }
    if file.buckets.is_some() {
        cfg.buckets = file.buckets.clone(); // override semantics, order preserved
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }

    // Merge sample section
    if let Some(file_sample) = &file.sample {
        let mut sample = cfg.sample.clone().unwrap_or_default();
        if file_sample.count.is_some() {
            sample.count = file_sample.count;
        }
        if file_sample.delay_ms.is_some() {
            sample.delay_ms = file_sample.delay_ms;
        }
        if file_sample.timeout_secs.is_some() {
            sample.timeout_secs = file_sample.timeout_secs;
        }
        cfg.sample = Some(sample);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let config_filename = get_config_filename();
    for dir in cwd.ancestors() {
        let candidate = dir.join(config_filename);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_parses() {
        let cfg: Config = toml::from_str(
            r#"
            target = "10.0.1.10:80"

            [log]
            level = "debug"

            [sample]
            count = 50
            delay_ms = 250

            [[buckets]]
            name = "blue"
            patterns = ["backend-blue"]
            min = 60
            max = 80

            [[buckets]]
            name = "green"
            patterns = ["backend-green"]
            min = 20
            max = 40
            "#,
        )
        .unwrap();

        assert_eq!(cfg.target.as_deref(), Some("10.0.1.10:80"));
        assert_eq!(cfg.log().level(), "debug");
        assert_eq!(cfg.sample().count(), 50);
        assert_eq!(cfg.sample().delay_ms(), 250);
        assert_eq!(cfg.sample().timeout_secs(), 10); // default
        assert_eq!(cfg.buckets().len(), 2);
        assert_eq!(cfg.buckets()[0].name, "blue");
    }

    #[test]
    fn cli_bucket_specs_replace_config_buckets() {
        let cfg: Config = toml::from_str(
            r#"
            [[buckets]]
            name = "blue"
            patterns = ["backend-blue"]
            min = 60
            max = 80
            "#,
        )
        .unwrap();

        let specs = vec!["green:backend-green:20:40".to_string()];
        let buckets = cfg.resolve_buckets(&specs).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].name, "green");
    }

    #[test]
    fn resolve_delay_converts_seconds() {
        let cfg = Config::default();
        assert_eq!(cfg.resolve_delay(Some(0.1)), Duration::from_millis(100));
        assert_eq!(cfg.resolve_delay(None), Duration::from_millis(100)); // default
        assert_eq!(cfg.resolve_delay(Some(0.0)), Duration::from_millis(0));
    }

    #[test]
    fn resolve_target_requires_an_address() {
        let cfg = Config::default();
        assert!(cfg.resolve_target(None).is_err());
        assert!(cfg.resolve_target(Some("10.0.1.10")).is_ok());
    }
}

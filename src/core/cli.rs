use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths (including config discovery) will be interpreted
    /// relative to this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a workspace config file
    Init,

    /// Sample a target and validate the observed traffic split
    Run(RunArgs),

    /// Print various information about configuration and buckets
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Target address: host[:port][/path], optional http:// prefix.
    /// Replaces config `target` if provided.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Number of requests to issue.
    /// Replaces config [sample].count if provided.
    #[arg(long)]
    pub count: Option<u32>,

    /// Delay between consecutive requests, in seconds (fractional allowed).
    /// Replaces config [sample].delay_ms if provided.
    #[arg(long)]
    pub delay: Option<f64>,

    /// Per-request timeout in seconds.
    /// Replaces config [sample].timeout_secs if provided.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Bucket spec "name:pattern[|pattern...]:min:max". Repeatable;
    /// declaration order matters (first matching bucket wins).
    /// Replaces config [[buckets]] if provided.
    #[arg(long = "bucket")]
    pub buckets: Vec<String>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Log every sample as it is classified
    #[arg(long)]
    pub verbose: bool,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective global configuration
    Config(PrintConfigArgs),

    /// List the declared buckets in evaluation order
    Buckets(PrintBucketsArgs),
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print buckets subcommand
#[derive(Parser, Debug)]
pub struct PrintBucketsArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

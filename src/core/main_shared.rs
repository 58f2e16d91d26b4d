use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::{debug, warn};

use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::Verdict;
use crate::types::config::{CliOverrides, config, init_with_overrides};

pub async fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        let _ = env::set_current_dir(&cwd);
    }

    // Build CLI overrides for config precedence
    let cli_overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
    };

    // Initialize configuration (file, then CLI overrides)
    init_with_overrides(&cli_overrides);

    // Initialize logging after config so level/color are applied
    init_logging();

    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);

    ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, stopping after the current request..");
        running_ctrlc.store(false, Ordering::SeqCst);
    })
    .expect("Error creating a Ctrl-C handler");

    // Dispatch to appropriate command
    let exit_code = match args.command {
        Commands::Run(run_args) => {
            // Resolve command-specific options against the config
            let target = config().resolve_target(run_args.target.as_deref())?;
            let buckets = config().resolve_buckets(&run_args.buckets)?;
            let count = config().resolve_count(run_args.count);
            let delay = config().resolve_delay(run_args.delay);
            let timeout = config().resolve_timeout(run_args.timeout);

            let report = cmds::execute_run(
                run_args,
                target,
                buckets,
                count,
                delay,
                timeout,
                Arc::clone(&running),
            )
            .await?;

            // Exit code from the run outcome
            match report {
                // Run was interrupted before completing
                None => 2,
                Some(report) if report.verdict == Verdict::Fail => 1,
                Some(_) => 0,
            }
        }
        Commands::Print {
            command: print_args,
        } => {
            match print_args {
                PrintArgs::Config(args) => {
                    cmds::execute_print(cmds::print::PrintCommand::Config(args.format)).await?
                }
                PrintArgs::Buckets(args) => {
                    cmds::execute_print(cmds::print::PrintCommand::Buckets(args.format)).await?
                }
            }
            0
        }
        Commands::Init => {
            cmds::execute_init().await?;
            0
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

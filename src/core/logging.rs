use log::LevelFilter;

use crate::types::config::config;

/// Install the global logger. Info-level records are the primary output
/// channel and render as bare lines; other levels carry a timestamp and
/// level tag. Must run after configuration is initialized.
pub fn init_logging() {
    let level = match config().log().level() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            if record.level() == log::Level::Info {
                out.finish(format_args!("{message}"))
            } else {
                out.finish(format_args!(
                    "[{} {}] {message}",
                    chrono::Local::now().format("%H:%M:%S"),
                    record.level()
                ))
            }
        })
        .level(level)
        .chain(std::io::stdout());

    // A second apply (tests, repeated init) keeps the existing logger
    let _ = dispatch.apply();
}

// ============================================================================
// pillarcrop-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger Setup for the CLI
//
// All output from pillarcrop-core goes through the `log` facade. The CLI
// installs env_logger with a compact format: local time, a coloured level
// tag and the message. The level defaults to info (debug with --verbose)
// and RUST_LOG overrides it.

use console::style;
use log::LevelFilter;
use std::io::Write;

/// Initializes the global logger. Call once, before any work starts.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let tag = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(
                buf,
                "{} {} {}",
                style(get_time()).dim().for_stderr(),
                tag.for_stderr(),
                record.args()
            )
        })
        .init();

    log::debug!("Logger initialized with level: {}", level);
}

/// Current local time as "HH:MM:SS".
pub fn get_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

//! Log output for the CLI
//!
//! Logs go to stderr so generated listings on stdout stay machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable overriding every other log setting
pub const LOG_ENV: &str = "CLASSGEN_LOG";

/// Filter directive for a configured level and a `-v` count
///
/// The more verbose of the two wins. A configured directive that is not a
/// bare level is replaced outright by `-v`.
pub fn filter_directive(level: &str, verbose: u8) -> String {
    let requested = match verbose {
        0 => return level.to_string(),
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    match level.trim().parse::<LevelFilter>() {
        Ok(configured) if configured >= requested => level.to_string(),
        _ if requested == LevelFilter::DEBUG => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

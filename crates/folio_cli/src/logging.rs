//! Tracing subscriber setup.

use folio_config::{LogLevel, LoggingConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::GlobalArgs;

/// Installs the global subscriber, writing to stderr.
///
/// `--verbose` and `--quiet` override the configured level; `RUST_LOG`
/// directives override both.
pub fn init(global: &GlobalArgs, logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter(effective_level(global, logging)).into())
        .from_env_lossy();

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| format!("failed to install tracing subscriber: {err}").into())
}

fn effective_level(global: &GlobalArgs, logging: &LoggingConfig) -> LogLevel {
    if global.verbose {
        LogLevel::Debug
    } else if global.quiet {
        LogLevel::Error
    } else {
        logging.level
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

//! stderr logging for the binary. Level precedence: `-v` flags, then
//! `TASKDECK_LOG`, then `log_level` from the configuration.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

const LEVEL_ENV: &str = "TASKDECK_LOG";

pub fn resolve_level(verbose: u8, env_level: Option<String>, config_level: &str) -> String {
    match verbose {
        0 => env_level
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| config_level.to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Starts the logger; keep the handle alive for the life of the process.
pub fn init_logging(verbose: u8, config_level: &str) -> Result<LoggerHandle> {
    let level = resolve_level(verbose, std::env::var(LEVEL_ENV).ok(), config_level);
    Logger::try_with_str(&level)
        .with_context(|| format!("Invalid log level '{}'", level))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")
}

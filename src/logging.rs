// src/logging.rs

//! Logging setup for `mexec` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `--log-level` flag and defaults to `warn`, so a
//! clean run prints nothing beyond what the stages themselves print.
//!
//! Logs are sent to STDERR: stdout of the last stage is the pipeline's
//! output and must stay untouched. Colours are used only when STDERR is a
//! terminal.

use std::io::IsTerminal;

use anyhow::{Result, anyhow};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Call once at startup, before any stage is spawned, so every stage
/// inherits the same subscriber across `fork`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level
        .map(level_from_log_level)
        .unwrap_or(tracing::Level::WARN);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

// src/logging.rs

//! Logging setup for `devreload` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (applies to every target)
//! 2. `DEVRELOAD_LOG`, which takes full `EnvFilter` directives such as
//!    `devreload::watch=debug,info`
//! 3. `info`
//!
//! Logs go to stderr. Stdout carries the supervisor messages and has to
//! stay machine-readable.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "DEVRELOAD_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Resolve the filter without installing anything.
pub fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }

    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives.trim()).unwrap_or_else(|err| {
                eprintln!("devreload: ignoring invalid {LOG_ENV}: {err}");
                EnvFilter::new(DEFAULT_DIRECTIVE)
            })
        }
        _ => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `devreload`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "devreload",
    version,
    about = "Watch source directories and ask the master process to reload its worker.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `DevReload.toml` in the current working directory. A missing
    /// default file is not an error; built-in defaults are used instead.
    #[arg(long, value_name = "PATH", default_value = "DevReload.toml")]
    pub config: String,

    /// Base directory that watch and ignore dirs are resolved against.
    ///
    /// Overrides `base_dir` from the config file.
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVRELOAD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the watch set, ignore prefixes and hooks, then exit.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevReloadError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid reload pattern '{pattern}': {source}")]
    GlobError {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("before-reload hook #{index} failed: {source}")]
    HookFailed {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to signal supervisor: {0}")]
    SignalError(String),

    #[error("file watcher error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DevReloadError>;

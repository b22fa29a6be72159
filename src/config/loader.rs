// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that the watch set is non-empty, reload patterns compile and
///   hook commands are not blank.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the built-in
/// defaults when `allow_missing` is set.
///
/// The CLI sets `allow_missing` only for the default config path, so a
/// mistyped `--config` still fails loudly.
pub fn load_or_default(path: impl AsRef<Path>, allow_missing: bool) -> Result<ConfigFile> {
    let path = path.as_ref();
    if allow_missing && !path.exists() {
        info!(path = %path.display(), "no config file found; using defaults");
        return Ok(ConfigFile::default());
    }
    load_and_validate(path)
}

/// Default config location: `DevReload.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("DevReload.toml")
}

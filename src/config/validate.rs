// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevReloadError, Result};
use crate::watch::patterns::ReloadPattern;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DevReloadError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.base_dir, raw.development))
    }
}

/// Check an already-validated config again, e.g. after edits in tests.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_raw_config(&RawConfigFile {
        base_dir: cfg.base_dir().map(PathBuf::from),
        development: cfg.development().clone(),
    })
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_set(cfg)?;
    validate_ignore_dirs(cfg)?;
    validate_reload_pattern(cfg)?;
    validate_hooks(cfg)?;
    Ok(())
}

fn validate_watch_set(cfg: &RawConfigFile) -> Result<()> {
    if cfg.development.effective_watch_dirs().is_empty() {
        return Err(DevReloadError::ConfigError(
            "[development].override_default = true requires at least one entry in watch_dirs"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_ignore_dirs(cfg: &RawConfigFile) -> Result<()> {
    // A blank entry resolves to the base directory itself and would silence
    // every change.
    if let Some(pos) = cfg
        .development
        .ignore_dirs
        .iter()
        .position(|d| d.trim().is_empty())
    {
        return Err(DevReloadError::ConfigError(format!(
            "[development].ignore_dirs[{pos}] is empty"
        )));
    }
    Ok(())
}

fn validate_reload_pattern(cfg: &RawConfigFile) -> Result<()> {
    let Some(patterns) = &cfg.development.reload_pattern else {
        return Ok(());
    };

    if !patterns.iter().any(|p| !p.starts_with('!')) {
        return Err(DevReloadError::ConfigError(
            "[development].reload_pattern needs at least one include pattern".to_string(),
        ));
    }

    // Compile once to surface bad globs at load time; the base dir does not
    // affect compilation.
    ReloadPattern::new(PathBuf::new(), patterns)?;
    Ok(())
}

fn validate_hooks(cfg: &RawConfigFile) -> Result<()> {
    for (i, cmd) in cfg.development.before_reload.iter().enumerate() {
        if cmd.trim().is_empty() {
            return Err(DevReloadError::ConfigError(format!(
                "[development].before_reload[{i}] is an empty command"
            )));
        }
    }
    Ok(())
}

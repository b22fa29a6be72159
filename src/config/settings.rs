// src/config/settings.rs

//! Validated config resolved into absolute paths and compiled patterns.

use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::reload::hooks::HookRegistry;
use crate::watch::path_utils::{absolutize, normalize_path};
use crate::watch::patterns::ReloadPattern;
use crate::watch::policy::RestartPolicy;
use crate::watch::roots::{IgnorePrefixes, WatchRoots};

/// Everything the pipeline needs from configuration, fixed for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct ReloadSettings {
    pub base_dir: PathBuf,
    pub roots: WatchRoots,
    pub ignore: IgnorePrefixes,
    pub reload_pattern: Option<ReloadPattern>,
    pub reload_on_change: bool,
    pub before_reload: Vec<String>,
}

impl ReloadSettings {
    /// Resolve `cfg` against an absolute `base_dir`.
    pub fn resolve(cfg: &ConfigFile, base_dir: &Path) -> Result<Self> {
        let base_dir = normalize_path(base_dir);
        let dev = cfg.development();

        let reload_pattern = match &dev.reload_pattern {
            Some(patterns) => Some(ReloadPattern::new(base_dir.clone(), patterns)?),
            None => None,
        };

        Ok(Self {
            roots: WatchRoots::resolve(&base_dir, &dev.effective_watch_dirs()),
            ignore: IgnorePrefixes::resolve(&base_dir, &dev.effective_ignore_dirs()),
            reload_pattern,
            reload_on_change: dev.reload_on_change,
            before_reload: dev.before_reload.clone(),
            base_dir,
        })
    }

    pub fn policy(&self) -> RestartPolicy {
        RestartPolicy::new(
            self.reload_on_change,
            self.ignore.clone(),
            self.reload_pattern.clone(),
        )
    }

    /// A fresh registry pre-filled with the configured hook commands.
    ///
    /// Callers may register more hooks before freezing it.
    pub fn hook_registry(&self) -> HookRegistry {
        let mut registry = HookRegistry::new();
        for cmd in &self.before_reload {
            registry.register_command(cmd.clone());
        }
        registry
    }
}

/// Pick the base directory, in priority order:
///
/// 1. `cli_base_dir` (`--base-dir`), relative to the working directory
/// 2. `base_dir` from the config, relative to the config file's directory
/// 3. the config file's directory
///
/// The result is absolute and normalized.
pub fn resolve_base_dir(
    cli_base_dir: Option<&str>,
    cfg: &ConfigFile,
    config_path: &Path,
) -> Result<PathBuf> {
    if let Some(dir) = cli_base_dir {
        return Ok(absolutize(Path::new(dir))?);
    }

    let config_dir = config_root_dir(config_path);
    let dir = match cfg.base_dir() {
        Some(dir) => config_dir.join(dir),
        None => config_dir,
    };
    Ok(absolutize(&dir)?)
}

/// Directory holding the config file.
///
/// A bare filename like "DevReload.toml" has an empty parent, in which case
/// the current working directory "." is used.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

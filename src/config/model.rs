// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::watch::roots::{DEFAULT_IGNORE_DIRS, DEFAULT_WATCH_DIRS, effective_dirs};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// base_dir = "."
///
/// [development]
/// watch_dirs = ["lib"]
/// ignore_dirs = ["app/tmp"]
/// reload_pattern = ["**/*.rs"]
/// before_reload = ["cargo build"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Directory the watch/ignore dirs are resolved against.
    ///
    /// Relative values are taken relative to the config file's directory.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Reload behaviour from `[development]`.
    #[serde(default)]
    pub development: DevelopmentSection,
}

/// Validated configuration.
///
/// Can only be obtained through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`ConfigFile::default`], which is valid by construction.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    base_dir: Option<PathBuf>,
    development: DevelopmentSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(base_dir: Option<PathBuf>, development: DevelopmentSection) -> Self {
        Self {
            base_dir,
            development,
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn development(&self) -> &DevelopmentSection {
        &self.development
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(None, DevelopmentSection::default())
    }
}

/// `[development]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DevelopmentSection {
    /// Extra directories to watch, relative to the base directory.
    #[serde(default)]
    pub watch_dirs: Vec<String>,

    /// Extra directories whose changes never reload.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,

    /// If true, `watch_dirs` replaces the built-in watch list instead of
    /// extending it.
    #[serde(default)]
    pub override_default: bool,

    /// If true, `ignore_dirs` replaces the built-in ignore list instead of
    /// extending it.
    #[serde(default)]
    pub override_ignore: bool,

    /// Optional glob allow-list; `!` marks an exclusion.
    #[serde(default)]
    pub reload_pattern: Option<Vec<String>>,

    /// Master switch for reloading on change.
    #[serde(default = "default_reload_on_change")]
    pub reload_on_change: bool,

    /// Shell commands run in order before every reload request.
    #[serde(default)]
    pub before_reload: Vec<String>,
}

fn default_reload_on_change() -> bool {
    true
}

impl Default for DevelopmentSection {
    fn default() -> Self {
        Self {
            watch_dirs: Vec::new(),
            ignore_dirs: Vec::new(),
            override_default: false,
            override_ignore: false,
            reload_pattern: None,
            reload_on_change: default_reload_on_change(),
            before_reload: Vec::new(),
        }
    }
}

impl DevelopmentSection {
    /// Built-in watch dirs plus `watch_dirs`, honouring `override_default`.
    pub fn effective_watch_dirs(&self) -> Vec<String> {
        effective_dirs(DEFAULT_WATCH_DIRS, &self.watch_dirs, self.override_default)
    }

    /// Built-in ignore dirs plus `ignore_dirs`, honouring `override_ignore`.
    pub fn effective_ignore_dirs(&self) -> Vec<String> {
        effective_dirs(DEFAULT_IGNORE_DIRS, &self.ignore_dirs, self.override_ignore)
    }
}

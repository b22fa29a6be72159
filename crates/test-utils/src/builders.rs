#![allow(dead_code)]

use std::path::{Path, PathBuf};

use devreload::config::{ConfigFile, DevelopmentSection, RawConfigFile, ReloadSettings};
use devreload::types::{ChangeEvent, ChangeKind};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                base_dir: None,
                development: DevelopmentSection::default(),
            },
        }
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    pub fn watch_dir(mut self, dir: &str) -> Self {
        self.config.development.watch_dirs.push(dir.to_string());
        self
    }

    pub fn ignore_dir(mut self, dir: &str) -> Self {
        self.config.development.ignore_dirs.push(dir.to_string());
        self
    }

    pub fn override_default(mut self, val: bool) -> Self {
        self.config.development.override_default = val;
        self
    }

    pub fn override_ignore(mut self, val: bool) -> Self {
        self.config.development.override_ignore = val;
        self
    }

    pub fn reload_pattern(mut self, pattern: &str) -> Self {
        let patterns = self.config.development.reload_pattern.get_or_insert(vec![]);
        patterns.push(pattern.to_string());
        self
    }

    pub fn reload_on_change(mut self, val: bool) -> Self {
        self.config.development.reload_on_change = val;
        self
    }

    pub fn before_reload(mut self, cmd: &str) -> Self {
        self.config.development.before_reload.push(cmd.to_string());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Build and resolve against `base_dir` in one go.
    pub fn settings(self, base_dir: impl AsRef<Path>) -> ReloadSettings {
        let cfg = self.build();
        ReloadSettings::resolve(&cfg, base_dir.as_ref()).expect("Failed to resolve settings")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A file changed at `path`.
pub fn changed(path: &str) -> ChangeEvent {
    ChangeEvent::file(path, ChangeKind::Changed)
}

/// A file added at `path`.
pub fn added(path: &str) -> ChangeEvent {
    ChangeEvent::file(path, ChangeKind::Added)
}

/// A file removed at `path`; the path no longer classifies as file or dir.
pub fn removed(path: &str) -> ChangeEvent {
    ChangeEvent::new(path, ChangeKind::Removed, false, false)
}

/// A directory-level change at `path`.
pub fn dir_changed(path: &str) -> ChangeEvent {
    ChangeEvent::directory(path, ChangeKind::Changed)
}

// src/watch/roots.rs

//! Absolute watch roots and ignore prefixes, resolved once at startup.

use std::path::{Path, PathBuf};

use crate::watch::path_utils::{join_normalized, path_str};

/// Directories watched by default, relative to the base directory.
pub const DEFAULT_WATCH_DIRS: &[&str] = &["app", "config", "mocks", "mocks_proxy"];

/// Directories whose changes never trigger a reload by default.
///
/// These churn constantly while assets are rebuilt.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["app/views", "app/assets", "app/public"];

/// Build the effective directory list: the base list followed by the user
/// additions, or only the user list when `override_base` is set.
pub fn effective_dirs(base: &[&str], extra: &[String], override_base: bool) -> Vec<String> {
    if override_base {
        return extra.to_vec();
    }
    base.iter()
        .map(|s| s.to_string())
        .chain(extra.iter().cloned())
        .collect()
}

fn resolve_unique(base_dir: &Path, dirs: &[String]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let path = join_normalized(base_dir, dir);
        if !out.contains(&path) {
            out.push(path);
        }
    }
    out
}

/// Ordered set of absolute paths to monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRoots {
    roots: Vec<PathBuf>,
}

impl WatchRoots {
    /// Resolve `dirs` against `base_dir`. Duplicates keep their first position.
    pub fn resolve(base_dir: &Path, dirs: &[String]) -> Self {
        Self {
            roots: resolve_unique(base_dir, dirs),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Ordered set of absolute path prefixes excluded from reloads.
///
/// Matching is a plain string prefix test on the normalized path, not a
/// path-segment comparison: with `/app/app/assets` ignored, a change under
/// `/app/app/assets2` is ignored too.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnorePrefixes {
    prefixes: Vec<String>,
}

impl IgnorePrefixes {
    pub fn resolve(base_dir: &Path, dirs: &[String]) -> Self {
        Self {
            prefixes: resolve_unique(base_dir, dirs)
                .iter()
                .map(|p| path_str(p))
                .collect(),
        }
    }

    /// Build from already-absolute prefixes, used as given.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `path` starts with any configured prefix.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

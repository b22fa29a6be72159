// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{DevReloadError, Result};
use crate::watch::path_utils::relative_str;

/// Compiled `reload_pattern` allow-list.
///
/// This corresponds to:
///
/// ```toml
/// [development]
/// reload_pattern = ["**/*.rs", "!**/*_test.rs"]
/// ```
///
/// - Plain patterns are includes: a path must match at least one.
/// - Patterns starting with `!` are excludes: a matching path never reloads.
///
/// Each pattern is tested against the absolute event path and, when the path
/// lies under the base directory, against the base-relative path as well, so
/// both `**/*.rs` and `app/**/*.rs` work as expected.
#[derive(Clone)]
pub struct ReloadPattern {
    base_dir: PathBuf,
    patterns: Vec<String>,
    include_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for ReloadPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadPattern")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl ReloadPattern {
    /// Compile the given patterns. Fails on the first invalid glob.
    pub fn new(base_dir: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
        let (excludes, includes): (Vec<&String>, Vec<&String>) =
            patterns.iter().partition(|p| p.starts_with('!'));

        let include_set = build_globset(includes.iter().map(|p| p.as_str()))?;
        let exclude_set = if excludes.is_empty() {
            None
        } else {
            Some(build_globset(excludes.iter().map(|p| &p[1..]))?)
        };

        Ok(Self {
            base_dir: base_dir.into(),
            patterns: patterns.to_vec(),
            include_set,
            exclude_set,
        })
    }

    /// The raw patterns as configured.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if `path` is eligible to trigger a reload.
    pub fn matches(&self, path: &Path) -> bool {
        let abs = path.to_string_lossy().replace('\\', "/");
        let rel = relative_str(&self.base_dir, path);

        let hit = |set: &GlobSet| {
            set.is_match(&abs) || rel.as_deref().is_some_and(|r| set.is_match(r))
        };

        if !hit(&self.include_set) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if hit(exclude) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|source| DevReloadError::GlobError {
            pattern: pat.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| DevReloadError::GlobError {
        pattern: "<set>".to_string(),
        source,
    })
}

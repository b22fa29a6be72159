// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components, resolve `..` against the
/// preceding component and strip trailing separators.
///
/// No filesystem access happens here, so symlinks are not resolved. This
/// mirrors how the configured directories are joined onto the base directory
/// and keeps prefix comparisons stable for paths that do not exist yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root; on a relative path with
                // nothing left to pop it is kept verbatim.
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    _ => false,
                };
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Join `dir` onto `base` (absolute `dir` wins) and normalize the result.
pub fn join_normalized(base: &Path, dir: &str) -> PathBuf {
    normalize_path(&base.join(dir))
}

/// Make `path` absolute against the current working directory, then normalize.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(normalize_path(&cwd.join(path)))
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path does not lie under `root`. Unlike the watcher's
/// own prefix checks this comparison is component-aware.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
}

/// The path as the string used for prefix comparisons.
pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

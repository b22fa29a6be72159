use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Kind of filesystem change carried by a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Changed => "changed",
            ChangeKind::Removed => "removed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change delivered by the event source.
///
/// `path` is absolute. `is_file` and `is_directory` describe the path as it
/// was observed when the event was produced; for removed paths both are
/// usually false, unless the watcher backend reported the removed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub is_file: bool,
    pub is_directory: bool,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind, is_file: bool, is_directory: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            is_file,
            is_directory,
        }
    }

    /// Convenience for a file-level change.
    pub fn file(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self::new(path, kind, true, false)
    }

    /// Convenience for a directory-level change.
    pub fn directory(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self::new(path, kind, false, true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Action requested from the supervising process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupervisorAction {
    ReloadWorker,
}

/// The one-way message sent to the master process.
///
/// Serialized as `{"to":"master","action":"reload-worker"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorMessage {
    pub to: &'static str,
    pub action: SupervisorAction,
}

impl SupervisorMessage {
    pub const MASTER: &'static str = "master";

    pub fn reload_worker() -> Self {
        Self {
            to: Self::MASTER,
            action: SupervisorAction::ReloadWorker,
        }
    }
}

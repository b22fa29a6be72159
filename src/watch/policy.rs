// src/watch/policy.rs

//! Restart policy: decides whether a settled change event reloads the worker.

use crate::types::ChangeEvent;
use crate::watch::patterns::ReloadPattern;
use crate::watch::roots::IgnorePrefixes;

/// Filter applied to every debounced event.
///
/// Rules are checked in order and the first match wins:
///
/// 1. `reload_on_change = false` rejects everything.
/// 2. Directory events are rejected; only file-level changes reload.
/// 3. Paths starting with an ignore prefix are rejected.
/// 4. With a reload pattern configured, paths it does not match are rejected.
/// 5. Everything else reloads.
#[derive(Debug, Clone)]
pub struct RestartPolicy {
    reload_on_change: bool,
    ignore: IgnorePrefixes,
    pattern: Option<ReloadPattern>,
}

impl RestartPolicy {
    pub fn new(
        reload_on_change: bool,
        ignore: IgnorePrefixes,
        pattern: Option<ReloadPattern>,
    ) -> Self {
        Self {
            reload_on_change,
            ignore,
            pattern,
        }
    }

    pub fn reload_on_change(&self) -> bool {
        self.reload_on_change
    }

    pub fn ignore_prefixes(&self) -> &IgnorePrefixes {
        &self.ignore
    }

    pub fn reload_pattern(&self) -> Option<&ReloadPattern> {
        self.pattern.as_ref()
    }

    pub fn should_restart(&self, event: &ChangeEvent) -> bool {
        if !self.reload_on_change {
            return false;
        }

        if event.is_directory {
            return false;
        }

        if self.ignore.is_ignored(&event.path) {
            return false;
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.matches(&event.path) {
                return false;
            }
        }

        true
    }
}

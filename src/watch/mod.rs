// src/watch/mod.rs

//! File watching and change filtering.
//!
//! This module is responsible for:
//! - Resolving the watch roots and ignore prefixes against the base directory.
//! - Compiling the optional `reload_pattern` globs.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Debouncing bursts of changes into one settled event.
//! - Deciding whether a settled event should reload the worker.
//!
//! It does **not** know about hooks or the supervisor; it only turns
//! filesystem changes into reload decisions.

pub mod debounce;
pub mod path_utils;
pub mod patterns;
pub mod policy;
pub mod roots;
pub mod watcher;

pub use debounce::{DEBOUNCE_WINDOW, Debouncer};
pub use patterns::ReloadPattern;
pub use policy::RestartPolicy;
pub use roots::{DEFAULT_IGNORE_DIRS, DEFAULT_WATCH_DIRS, IgnorePrefixes, WatchRoots};
pub use watcher::{WatcherHandle, change_events_from_notify, forward_notify_result, spawn_watcher};

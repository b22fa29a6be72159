// src/engine/mod.rs

//! Orchestration engine for devreload.
//!
//! The runtime loop reacts to:
//! - file-change events from the watcher
//! - the debounce window closing
//! - shutdown signals
//!
//! and hands every settled event to the [`ReloadPipeline`](crate::reload::ReloadPipeline).

use crate::types::ChangeEvent;

/// Events flowing into the runtime from the watcher and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A raw change observed under one of the watch roots.
    FileChanged(ChangeEvent),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Counters for the cycles a runtime went through, returned when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeSummary {
    /// Debounce windows that closed and reached the pipeline.
    pub settled: usize,
    /// Reload requests sent to the master.
    pub signaled: usize,
    /// Settled events rejected by the restart policy.
    pub suppressed: usize,
    /// Settled events ignored because a debugger is attached.
    pub debug_attached: usize,
    /// Cycles aborted by a failing before-reload hook.
    pub hook_failures: usize,
}

pub mod runtime;

pub use runtime::Runtime;

// src/reload/pipeline.rs

//! From a settled change event to a reload request.

use tracing::warn;

use crate::errors::Result;
use crate::reload::hooks::BeforeReloadHooks;
use crate::reload::signal::SignalEmitter;
use crate::types::ChangeEvent;
use crate::watch::policy::RestartPolicy;

/// What happened to a settled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A debugger is attached; nothing was filtered, run or sent.
    DebugAttached,
    /// The restart policy rejected the event.
    Suppressed,
    /// Hooks completed and the reload request was sent.
    Signaled,
}

/// Policy, hooks and emitter for one process.
///
/// Everything here is fixed once built; [`handle`](Self::handle) only reads.
#[derive(Debug, Clone)]
pub struct ReloadPipeline {
    policy: RestartPolicy,
    hooks: BeforeReloadHooks,
    emitter: SignalEmitter,
}

impl ReloadPipeline {
    pub fn new(policy: RestartPolicy, hooks: BeforeReloadHooks, emitter: SignalEmitter) -> Self {
        Self {
            policy,
            hooks,
            emitter,
        }
    }

    pub fn policy(&self) -> &RestartPolicy {
        &self.policy
    }

    pub fn hooks(&self) -> &BeforeReloadHooks {
        &self.hooks
    }

    /// Run one settled event through the pipeline.
    ///
    /// Suppressed events are silent. A reload logs one warning naming the
    /// path and change kind, then runs the hooks in order, then signals the
    /// master. A failing hook is returned as an error and nothing is sent.
    pub async fn handle(&self, event: &ChangeEvent) -> Result<ReloadOutcome> {
        if self.emitter.is_suppressed() {
            return Ok(ReloadOutcome::DebugAttached);
        }

        if !self.policy.should_restart(event) {
            return Ok(ReloadOutcome::Suppressed);
        }

        warn!(
            "[devreload] reload worker because {} {}",
            event.path.display(),
            event.kind
        );

        self.hooks.run_all().await?;

        if self.emitter.emit()? {
            Ok(ReloadOutcome::Signaled)
        } else {
            Ok(ReloadOutcome::DebugAttached)
        }
    }
}

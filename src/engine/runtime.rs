// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::errors::{DevReloadError, Result};
use crate::reload::{ReloadOutcome, ReloadPipeline};
use crate::types::ChangeEvent;
use crate::watch::debounce::Debouncer;

use super::{RuntimeEvent, RuntimeSummary};

/// Drives the reload pipeline in response to `RuntimeEvent`s.
///
/// A single loop owns the debouncer: change events re-arm it, and when the
/// window closes the settled event goes through the pipeline. Hooks are
/// awaited inline, so at most one reload cycle is in flight; changes that
/// arrive meanwhile wait in the channel and open the next window.
pub struct Runtime {
    pipeline: ReloadPipeline,
    debouncer: Debouncer<ChangeEvent>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("pipeline", &self.pipeline)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(pipeline: ReloadPipeline, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        Self {
            pipeline,
            debouncer: Debouncer::default(),
            event_rx,
        }
    }

    /// Replace the debounce window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debouncer = Debouncer::new(window);
        self
    }

    /// Main event loop.
    ///
    /// Returns when shutdown is requested or the event channel closes; a
    /// pending debounce is discarded at that point and never fires. Hook
    /// failures are logged and end only the current cycle. A failure to
    /// reach the master ends the loop with an error.
    pub async fn run(mut self) -> Result<RuntimeSummary> {
        info!(
            window_ms = self.debouncer.window().as_millis() as u64,
            hooks = self.pipeline.hooks().len(),
            "devreload runtime started"
        );

        let mut summary = RuntimeSummary::default();

        loop {
            tokio::select! {
                biased;

                event = self.debouncer.settled() => {
                    self.on_settled(event, &mut summary).await?;
                }

                msg = self.event_rx.recv() => match msg {
                    Some(RuntimeEvent::FileChanged(event)) => {
                        debug!(path = %event.path.display(), kind = %event.kind, "change received");
                        self.debouncer.on_event(event);
                    }
                    Some(RuntimeEvent::ShutdownRequested) => {
                        info!("shutdown requested; stopping runtime");
                        break;
                    }
                    None => {
                        info!("runtime event channel closed; exiting");
                        break;
                    }
                },
            }
        }

        if self.debouncer.cancel() {
            debug!("discarded pending change on shutdown");
        }

        info!(?summary, "runtime exiting");
        Ok(summary)
    }

    async fn on_settled(&mut self, event: ChangeEvent, summary: &mut RuntimeSummary) -> Result<()> {
        summary.settled += 1;

        match self.pipeline.handle(&event).await {
            Ok(ReloadOutcome::Signaled) => summary.signaled += 1,
            Ok(ReloadOutcome::Suppressed) => summary.suppressed += 1,
            Ok(ReloadOutcome::DebugAttached) => summary.debug_attached += 1,
            Err(err @ DevReloadError::HookFailed { .. }) => {
                summary.hook_failures += 1;
                error!(
                    path = %event.path.display(),
                    error = %err,
                    "before-reload hook failed; worker not reloaded"
                );
            }
            Err(err) => return Err(err),
        }

        Ok(())
    }
}

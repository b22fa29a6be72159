use std::sync::{Arc, Mutex};
use std::time::Duration;

use devreload::errors::{DevReloadError, Result};
use devreload::reload::{HookRegistry, SignalChannel};
use devreload::types::SupervisorMessage;

/// A signal channel that records every message it is asked to send.
///
/// Can be switched into a failing mode to simulate a vanished supervisor.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    sent: Arc<Mutex<Vec<SupervisorMessage>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SupervisorMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn set_failing(&self, val: bool) {
        *self.fail.lock().unwrap() = val;
    }
}

impl SignalChannel for RecordingChannel {
    fn send(&self, message: &SupervisorMessage) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(DevReloadError::SignalError("supervisor gone".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Shared journal that hooks append "start:<name>" / "end:<name>" lines to.
#[derive(Debug, Clone, Default)]
pub struct HookJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl HookJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Register a hook that records its start, sleeps for `delay`, records
    /// its end and then succeeds.
    pub fn register(&self, registry: &mut HookRegistry, name: &str, delay: Duration) {
        let journal = self.clone();
        let name = name.to_string();
        registry.register_before_reload(move || {
            let journal = journal.clone();
            let name = name.clone();
            async move {
                journal.push(format!("start:{name}"));
                tokio::time::sleep(delay).await;
                journal.push(format!("end:{name}"));
                Ok(())
            }
        });
    }

    /// Register a hook that records its start and then fails.
    pub fn register_failing(&self, registry: &mut HookRegistry, name: &str) {
        let journal = self.clone();
        let name = name.to_string();
        registry.register_before_reload(move || {
            let journal = journal.clone();
            let name = name.clone();
            async move {
                journal.push(format!("start:{name}"));
                Err(anyhow::anyhow!("hook {name} failed"))
            }
        });
    }
}

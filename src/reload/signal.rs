// src/reload/signal.rs

//! One-way messaging to the supervising (master) process.
//!
//! The emitter talks to a [`SignalChannel`] rather than a concrete transport.
//!
//! - [`StdoutChannel`] is the default used by the `devreload` binary: each
//!   message is a JSON line on stdout, read by the parent process.
//! - [`WriterChannel`] does the same over any `Write` sink.
//! - [`MpscChannel`] forwards messages in-process, for embedding a
//!   supervisor in the same program and for tests.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::{DevReloadError, Result};
use crate::types::SupervisorMessage;

/// Environment flag that suppresses every reload request.
///
/// Set it while a debugger is attached so the worker is not killed out from
/// under the developer.
pub const DEBUG_ENV: &str = "DEVRELOAD_DEBUG";

/// Fire-and-forget transport towards the supervisor.
///
/// `send` does not wait for any acknowledgement. Transport failures are
/// returned as they happen and are never retried.
pub trait SignalChannel: Send + Sync {
    fn send(&self, message: &SupervisorMessage) -> Result<()>;
}

/// Writes each message as one JSON line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutChannel;

impl SignalChannel for StdoutChannel {
    fn send(&self, message: &SupervisorMessage) -> Result<()> {
        write_line(&mut std::io::stdout().lock(), message)
    }
}

/// Writes each message as one JSON line to any byte sink, e.g. a pipe to
/// the supervisor.
#[derive(Debug, Default)]
pub struct WriterChannel<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterChannel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> SignalChannel for WriterChannel<W> {
    fn send(&self, message: &SupervisorMessage) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write_line(&mut *out, message)
    }
}

/// One message, one line, flushed. A closed pipe is a signal failure, not a
/// generic I/O error.
fn write_line(out: &mut impl Write, message: &SupervisorMessage) -> Result<()> {
    let line = serde_json::to_string(message)
        .map_err(|e| DevReloadError::SignalError(e.to_string()))?;
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|e| DevReloadError::SignalError(format!("writing to supervisor: {e}")))
}

/// Forwards messages over an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct MpscChannel {
    tx: mpsc::UnboundedSender<SupervisorMessage>,
}

impl MpscChannel {
    pub fn new(tx: mpsc::UnboundedSender<SupervisorMessage>) -> Self {
        Self { tx }
    }

    /// Create a channel together with the supervisor-side receiver.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<SupervisorMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SignalChannel for MpscChannel {
    fn send(&self, message: &SupervisorMessage) -> Result<()> {
        self.tx
            .send(message.clone())
            .map_err(|_| DevReloadError::SignalError("supervisor channel closed".to_string()))
    }
}

/// Returns true if the debug-attach flag is set in the environment.
///
/// Any non-empty value counts as set, including `0` and `false`.
pub fn debug_attach_from_env() -> bool {
    std::env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty())
}

/// Sends reload requests unless a debugger is attached.
#[derive(Clone)]
pub struct SignalEmitter {
    channel: Arc<dyn SignalChannel>,
    debug_attach: bool,
}

impl std::fmt::Debug for SignalEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalEmitter")
            .field("debug_attach", &self.debug_attach)
            .finish_non_exhaustive()
    }
}

impl SignalEmitter {
    pub fn new(channel: Arc<dyn SignalChannel>, debug_attach: bool) -> Self {
        Self {
            channel,
            debug_attach,
        }
    }

    /// Like [`new`](Self::new), reading the flag from `DEVRELOAD_DEBUG`.
    pub fn from_env(channel: Arc<dyn SignalChannel>) -> Self {
        Self::new(channel, debug_attach_from_env())
    }

    pub fn is_suppressed(&self) -> bool {
        self.debug_attach
    }

    /// Ask the master to reload the worker.
    ///
    /// Returns `Ok(false)` without sending anything when suppressed.
    pub fn emit(&self) -> Result<bool> {
        if self.debug_attach {
            return Ok(false);
        }
        self.channel.send(&SupervisorMessage::reload_worker())?;
        debug!("reload-worker sent to master");
        Ok(true)
    }
}

// src/watch/debounce.rs

//! Trailing-edge debouncing of change events.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Quiescence window after the last event before the pipeline runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Debounce state: the latest pending payload and its deadline.
///
/// Every [`on_event`](Self::on_event) replaces the payload and pushes the
/// deadline to `now + window`. Earlier payloads in a burst are discarded; only
/// the last one is handed out by [`settled`](Self::settled), once the window
/// has passed without further events.
///
/// There is at most one deadline at any time, so a burst can never fire twice.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The payload that would be delivered if the window closed now.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Record an event: replace the pending payload and re-arm the timer.
    pub fn on_event(&mut self, event: T) {
        self.deadline = Some(Instant::now() + self.window);
        self.pending = Some(event);
    }

    /// Disarm without delivering. Returns true if a payload was discarded.
    pub fn cancel(&mut self) -> bool {
        self.deadline = None;
        self.pending.take().is_some()
    }

    /// Wait for the window to close and take the pending payload.
    ///
    /// Never resolves while disarmed. Dropping the future before it resolves
    /// leaves the state untouched, so this can sit in a `select!` next to the
    /// event receiver.
    pub async fn settled(&mut self) -> T {
        loop {
            let Some(deadline) = self.deadline else {
                return future::pending().await;
            };
            sleep_until(deadline).await;

            self.deadline = None;
            if let Some(event) = self.pending.take() {
                return event;
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

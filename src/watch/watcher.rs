// src/watch/watcher.rs

use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::types::{ChangeEvent, ChangeKind};
use crate::watch::roots::WatchRoots;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    watched: usize,
}

impl WatcherHandle {
    /// Number of roots actually being watched (missing roots are skipped).
    pub fn watched(&self) -> usize {
        self.watched
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("watched", &self.watched)
            .finish_non_exhaustive()
    }
}

/// Spawn a filesystem watcher over every root in `roots` and forward each
/// change as `RuntimeEvent::FileChanged` into the runtime.
///
/// Roots that do not exist are skipped with a warning. All events go through
/// one channel, so the runtime sees a single ordered stream for the whole
/// watch set.
pub fn spawn_watcher(
    roots: &WatchRoots,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| forward_notify_result(res, &event_tx),
        Config::default(),
    )?;

    let mut watched = 0;
    for root in roots.iter() {
        if !root.exists() {
            warn!(path = %root.display(), "watch root does not exist, skipping");
            continue;
        }
        match watcher.watch(root, RecursiveMode::Recursive) {
            Ok(()) => {
                info!(path = %root.display(), "watching");
                watched += 1;
            }
            Err(err) => warn!(path = %root.display(), error = %err, "failed to watch directory"),
        }
    }

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            for change in change_events_from_notify(&event) {
                if runtime_tx.send(RuntimeEvent::FileChanged(change)).await.is_err() {
                    debug!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        watched,
    })
}

/// Body of the notify callback: pass the event on, or log why it can't be.
///
/// Runs on the backend's own thread; the global tracing dispatcher is
/// reachable from there.
pub fn forward_notify_result(res: notify::Result<Event>, tx: &mpsc::UnboundedSender<Event>) {
    match res {
        Ok(event) => {
            if let Err(err) = tx.send(event) {
                warn!(error = %err, "failed to forward notify event; watcher loop is gone");
            }
        }
        Err(err) => warn!(error = %err, paths = ?err.paths, "file watch error"),
    }
}

/// Translate one `notify` event into zero or more [`ChangeEvent`]s.
///
/// - create -> added, modify -> changed, remove -> removed
/// - rename sources are removals and rename targets are additions
/// - access and unclassified events are dropped
pub fn change_events_from_notify(event: &Event) -> Vec<ChangeEvent> {
    let mut out = Vec::with_capacity(event.paths.len());

    match event.kind {
        EventKind::Create(kind) => {
            let hint = match kind {
                CreateKind::Folder => Some(true),
                CreateKind::File => Some(false),
                _ => None,
            };
            for path in &event.paths {
                out.push(observe(path, ChangeKind::Added, hint));
            }
        }
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => {
                for path in &event.paths {
                    out.push(observe(path, ChangeKind::Removed, None));
                }
            }
            RenameMode::To => {
                for path in &event.paths {
                    out.push(observe(path, ChangeKind::Added, None));
                }
            }
            RenameMode::Both => {
                let mut paths = event.paths.iter();
                if let Some(from) = paths.next() {
                    out.push(observe(from, ChangeKind::Removed, None));
                }
                for to in paths {
                    out.push(observe(to, ChangeKind::Added, None));
                }
            }
            _ => {
                for path in &event.paths {
                    let kind = if path.exists() {
                        ChangeKind::Added
                    } else {
                        ChangeKind::Removed
                    };
                    out.push(observe(path, kind, None));
                }
            }
        },
        EventKind::Modify(_) => {
            for path in &event.paths {
                out.push(observe(path, ChangeKind::Changed, None));
            }
        }
        EventKind::Remove(kind) => {
            let hint = match kind {
                RemoveKind::Folder => Some(true),
                RemoveKind::File => Some(false),
                _ => None,
            };
            for path in &event.paths {
                out.push(observe(path, ChangeKind::Removed, hint));
            }
        }
        EventKind::Access(_) | EventKind::Any | EventKind::Other => {}
    }

    out
}

/// Build a `ChangeEvent`, classifying the path as file or directory.
///
/// Existing paths are stat'ed. Removed or vanished paths fall back to the
/// backend's hint (`Some(true)` for folders), or neither when there is none.
fn observe(path: &Path, kind: ChangeKind, is_dir_hint: Option<bool>) -> ChangeEvent {
    let (is_file, is_directory) = match std::fs::metadata(path) {
        Ok(meta) if kind != ChangeKind::Removed => (meta.is_file(), meta.is_dir()),
        _ => match is_dir_hint {
            Some(true) => (false, true),
            Some(false) => (true, false),
            None => (false, false),
        },
    };
    ChangeEvent::new(path, kind, is_file, is_directory)
}

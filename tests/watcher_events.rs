mod common;
use crate::common::init_tracing;
use crate::common::logs::CapturedLogs;
use crate::common::with_timeout;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use tokio::sync::mpsc;

use devreload::engine::RuntimeEvent;
use devreload::types::{ChangeEvent, ChangeKind};
use devreload::watch::{
    WatchRoots, change_events_from_notify, forward_notify_result, spawn_watcher,
};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn existing_file_modification_is_a_file_change() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("user.js");
    std::fs::write(&file, "module.exports = {};")?;

    let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
        .add_path(file.clone());

    assert_eq!(
        change_events_from_notify(&event),
        vec![ChangeEvent::new(file, ChangeKind::Changed, true, false)]
    );
    Ok(())
}

#[test]
fn created_directory_is_a_directory_event() -> TestResult {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("service");
    std::fs::create_dir(&sub)?;

    let event = Event::new(EventKind::Create(CreateKind::Folder)).add_path(sub.clone());

    assert_eq!(
        change_events_from_notify(&event),
        vec![ChangeEvent::new(sub, ChangeKind::Added, false, true)]
    );
    Ok(())
}

#[test]
fn removals_use_the_backend_hint() {
    let gone = PathBuf::from("/definitely/not/here/app.js");
    let gone_dir = PathBuf::from("/definitely/not/here/views");

    let file_event = Event::new(EventKind::Remove(RemoveKind::File)).add_path(gone.clone());
    let dir_event = Event::new(EventKind::Remove(RemoveKind::Folder)).add_path(gone_dir.clone());
    let any_event = Event::new(EventKind::Remove(RemoveKind::Any)).add_path(gone.clone());

    assert_eq!(
        change_events_from_notify(&file_event),
        vec![ChangeEvent::new(gone.clone(), ChangeKind::Removed, true, false)]
    );
    assert_eq!(
        change_events_from_notify(&dir_event),
        vec![ChangeEvent::new(gone_dir, ChangeKind::Removed, false, true)]
    );
    assert_eq!(
        change_events_from_notify(&any_event),
        vec![ChangeEvent::new(gone, ChangeKind::Removed, false, false)]
    );
}

#[test]
fn rename_both_splits_into_removed_and_added() -> TestResult {
    let dir = tempfile::tempdir()?;
    let from = dir.path().join("old.js");
    let to = dir.path().join("new.js");
    std::fs::write(&to, "")?;

    let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        .add_path(from.clone())
        .add_path(to.clone());

    let changes = change_events_from_notify(&event);
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].path, from);
    assert_eq!(changes[0].kind, ChangeKind::Removed);
    assert_eq!(changes[1], ChangeEvent::new(to, ChangeKind::Added, true, false));
    Ok(())
}

#[test]
fn access_events_are_dropped() {
    let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("/app/a.js"));
    assert!(change_events_from_notify(&event).is_empty());
    assert!(change_events_from_notify(&Event::new(EventKind::Other)).is_empty());
}

#[test]
fn notify_callback_forwards_events_and_logs_failures() {
    let (logs, _guard) = CapturedLogs::install();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/app/a.js"));
    forward_notify_result(Ok(event.clone()), &tx);
    assert_eq!(rx.try_recv().ok(), Some(event));
    assert!(logs.contents().is_empty());

    forward_notify_result(Err(notify::Error::generic("inotify queue overflow")), &tx);
    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "got {lines:?}");
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("file watch error"));
    assert!(lines[0].contains("inotify queue overflow"));

    drop(rx);
    forward_notify_result(Ok(Event::new(EventKind::Any)), &tx);
    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "got {lines:?}");
    assert!(lines[1].contains("failed to forward notify event"));
}

#[tokio::test]
async fn missing_roots_are_skipped() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir(dir.path().join("app"))?;

    let roots = WatchRoots::resolve(
        dir.path(),
        &["app".to_string(), "config".to_string()],
    );
    let (tx, _rx) = mpsc::channel(16);
    let handle = spawn_watcher(&roots, tx)?;

    assert_eq!(handle.watched(), 1);
    Ok(())
}

/// Real filesystem round trip through `notify`.
///
/// Backend latency varies a lot between platforms and CI sandboxes, so this
/// is opt-in: run with `--ignored`.
#[tokio::test]
#[ignore = "depends on filesystem notification latency"]
async fn real_file_write_reaches_the_runtime() -> TestResult {
    let dir = tempfile::tempdir()?;
    let app = dir.path().join("app");
    std::fs::create_dir(&app)?;

    let roots = WatchRoots::resolve(dir.path(), &["app".to_string()]);
    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(&roots, tx)?;

    tokio::time::sleep(Duration::from_millis(500)).await;
    std::fs::write(app.join("user.js"), "module.exports = 1;")?;

    let event = with_timeout(async {
        loop {
            match rx.recv().await {
                Some(RuntimeEvent::FileChanged(ev)) if ev.path.ends_with("user.js") => break ev,
                Some(_) => continue,
                None => panic!("watcher channel closed"),
            }
        }
    })
    .await;

    assert!(event.is_file);
    Ok(())
}

mod common;
use crate::common::builders::changed;
use crate::common::init_tracing;
use crate::common::recording::{HookJournal, RecordingChannel};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use devreload::errors::DevReloadError;
use devreload::reload::{HookRegistry, ReloadOutcome, ReloadPipeline, SignalChannel, SignalEmitter};
use devreload::types::SupervisorMessage;
use devreload::watch::{IgnorePrefixes, RestartPolicy};

type TestResult = Result<(), Box<dyn Error>>;

/// Signal channel that records into the hook journal, so its position
/// relative to the hooks is visible.
struct JournalChannel(HookJournal);

impl SignalChannel for JournalChannel {
    fn send(&self, message: &SupervisorMessage) -> devreload::errors::Result<()> {
        assert_eq!(message, &SupervisorMessage::reload_worker());
        self.0.push("signal");
        Ok(())
    }
}

fn open_policy() -> RestartPolicy {
    RestartPolicy::new(true, IgnorePrefixes::from_prefixes(["/app/app/assets"]), None)
}

#[tokio::test(start_paused = true)]
async fn hooks_run_sequentially_in_registration_order_before_signal() -> TestResult {
    init_tracing();

    let journal = HookJournal::new();
    let mut registry = HookRegistry::new();
    // A is slower than B: if they overlapped B would finish first.
    journal.register(&mut registry, "A", Duration::from_millis(100));
    journal.register(&mut registry, "B", Duration::from_millis(10));

    let emitter = SignalEmitter::new(Arc::new(JournalChannel(journal.clone())), false);
    let pipeline = ReloadPipeline::new(open_policy(), registry.freeze(), emitter);

    let outcome = pipeline.handle(&changed("/app/app/service/a.js")).await?;

    assert_eq!(outcome, ReloadOutcome::Signaled);
    assert_eq!(
        journal.entries(),
        vec!["start:A", "end:A", "start:B", "end:B", "signal"]
    );
    Ok(())
}

#[tokio::test]
async fn failing_hook_stops_later_hooks_and_signal() -> TestResult {
    init_tracing();

    let journal = HookJournal::new();
    let mut registry = HookRegistry::new();
    journal.register_failing(&mut registry, "A");
    journal.register(&mut registry, "B", Duration::ZERO);

    let channel = RecordingChannel::new();
    let emitter = SignalEmitter::new(Arc::new(channel.clone()), false);
    let pipeline = ReloadPipeline::new(open_policy(), registry.freeze(), emitter);

    let result = pipeline.handle(&changed("/app/app/service/a.js")).await;

    match result {
        Err(DevReloadError::HookFailed { index, source }) => {
            assert_eq!(index, 0);
            assert!(source.to_string().contains("hook A failed"));
        }
        other => panic!("Expected HookFailed, got: {:?}", other),
    }
    assert_eq!(journal.entries(), vec!["start:A"]);
    assert_eq!(channel.count(), 0);
    Ok(())
}

#[tokio::test]
async fn suppressed_event_runs_no_hooks() -> TestResult {
    let journal = HookJournal::new();
    let mut registry = HookRegistry::new();
    journal.register(&mut registry, "A", Duration::ZERO);

    let channel = RecordingChannel::new();
    let emitter = SignalEmitter::new(Arc::new(channel.clone()), false);
    let pipeline = ReloadPipeline::new(open_policy(), registry.freeze(), emitter);

    let outcome = pipeline.handle(&changed("/app/app/assets/x.css")).await?;

    assert_eq!(outcome, ReloadOutcome::Suppressed);
    assert!(journal.entries().is_empty());
    assert_eq!(channel.count(), 0);
    Ok(())
}

#[tokio::test]
async fn hooks_run_again_on_every_reload() -> TestResult {
    let journal = HookJournal::new();
    let mut registry = HookRegistry::new();
    journal.register(&mut registry, "flush", Duration::ZERO);
    assert_eq!(registry.len(), 1);

    let hooks = registry.freeze();
    let shared = hooks.clone();
    assert_eq!(shared.len(), 1);

    hooks.run_all().await?;
    shared.run_all().await?;

    assert_eq!(
        journal.entries(),
        vec!["start:flush", "end:flush", "start:flush", "end:flush"]
    );
    Ok(())
}

#[tokio::test]
async fn empty_registry_goes_straight_to_signal() -> TestResult {
    let channel = RecordingChannel::new();
    let emitter = SignalEmitter::new(Arc::new(channel.clone()), false);
    let pipeline = ReloadPipeline::new(open_policy(), HookRegistry::new().freeze(), emitter);

    let outcome = pipeline.handle(&changed("/app/config/config.default.js")).await?;

    assert_eq!(outcome, ReloadOutcome::Signaled);
    assert_eq!(channel.sent(), vec![SupervisorMessage::reload_worker()]);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn command_hooks_run_in_order_and_fail_on_nonzero_exit() -> TestResult {
    let dir = tempfile::tempdir()?;
    let log = dir.path().join("hooks.log");
    let log_str = log.display().to_string();

    let mut registry = HookRegistry::new();
    registry.register_command(format!("echo first >> '{log_str}'"));
    registry.register_command(format!("echo second >> '{log_str}'"));
    registry.register_command("exit 3");
    registry.register_command(format!("echo never >> '{log_str}'"));

    let channel = RecordingChannel::new();
    let emitter = SignalEmitter::new(Arc::new(channel.clone()), false);
    let pipeline = ReloadPipeline::new(open_policy(), registry.freeze(), emitter);

    let err = pipeline
        .handle(&changed("/app/app/service/a.js"))
        .await
        .expect_err("exit 3 must fail the hook");

    match err {
        DevReloadError::HookFailed { index, source } => {
            assert_eq!(index, 2);
            assert!(source.to_string().contains("status 3"));
        }
        other => panic!("Expected HookFailed, got: {:?}", other),
    }

    let written = std::fs::read_to_string(&log)?;
    assert_eq!(written.lines().collect::<Vec<_>>(), vec!["first", "second"]);
    assert_eq!(channel.count(), 0);
    Ok(())
}

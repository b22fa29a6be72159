// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod reload;
pub mod types;
pub mod watch;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ReloadSettings, default_config_path, load_or_default, resolve_base_dir};
use crate::engine::{Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::reload::{HookRegistry, ReloadPipeline, SignalChannel, SignalEmitter, StdoutChannel};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and path resolution
/// - the before-reload hooks from the config
/// - the stdout supervisor channel
/// - the file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let is_default_path = config_path == default_config_path();
    let cfg = load_or_default(&config_path, is_default_path)?;

    let base_dir = resolve_base_dir(args.base_dir.as_deref(), &cfg, &config_path)?;
    let settings = ReloadSettings::resolve(&cfg, &base_dir)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    let hooks = settings.hook_registry();
    let channel: Arc<dyn SignalChannel> = Arc::new(StdoutChannel);
    let emitter = SignalEmitter::from_env(channel);

    run_with(settings, hooks, emitter).await
}

/// Run the agent with explicit collaborators.
///
/// Lets embedders register their own hooks on `hooks` and pick the channel
/// the emitter talks to. Watches until Ctrl-C.
pub async fn run_with(
    settings: ReloadSettings,
    hooks: HookRegistry,
    emitter: SignalEmitter,
) -> Result<()> {
    if emitter.is_suppressed() {
        warn!(
            env = reload::DEBUG_ENV,
            "debugger attach flag set; worker reloads are disabled"
        );
    }
    if !settings.reload_on_change {
        info!("reload_on_change = false; changes will not reload the worker");
    }

    let pipeline = ReloadPipeline::new(settings.policy(), hooks.freeze(), emitter);

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(256);

    let watcher = watch::spawn_watcher(&settings.roots, rt_tx.clone())?;
    if watcher.watched() == 0 {
        warn!(base_dir = %settings.base_dir.display(), "none of the watch roots exist");
    }

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(pipeline, rt_rx);
    let summary = runtime.run().await?;
    debug!(?summary, "runtime finished");

    // Keep the watcher alive until the runtime is done.
    drop(watcher);
    Ok(())
}

fn print_dry_run(settings: &ReloadSettings) {
    print!("{}", dry_run_report(settings));
    debug!("dry-run complete (no watching)");
}

/// The `--dry-run` report: resolved watch set, the filter the runtime will
/// apply, and the hook commands.
pub fn dry_run_report(settings: &ReloadSettings) -> String {
    let policy = settings.policy();
    let mut out = String::new();

    let _ = writeln!(out, "devreload dry-run");
    let _ = writeln!(out, "  base_dir = {}", settings.base_dir.display());
    let _ = writeln!(out, "  reload_on_change = {}", policy.reload_on_change());
    let _ = writeln!(out);

    let _ = writeln!(out, "watch roots ({}):", settings.roots.len());
    for root in settings.roots.iter() {
        let _ = writeln!(out, "  - {}{}", root.display(), missing_marker(root));
    }

    let ignore = policy.ignore_prefixes();
    let _ = writeln!(out, "ignore prefixes ({}):", ignore.len());
    for prefix in ignore.iter() {
        let _ = writeln!(out, "  - {prefix}");
    }

    match policy.reload_pattern() {
        Some(pattern) => {
            let _ = writeln!(out, "reload_pattern: {:?}", pattern.patterns());
        }
        None => {
            let _ = writeln!(out, "reload_pattern: (any file)");
        }
    }

    if !settings.before_reload.is_empty() {
        let _ = writeln!(out, "before_reload ({}):", settings.before_reload.len());
        for cmd in &settings.before_reload {
            let _ = writeln!(out, "  - {cmd}");
        }
    }

    out
}

fn missing_marker(path: &Path) -> &'static str {
    if path.exists() { "" } else { "  (missing)" }
}

// src/reload/mod.rs

//! Reload side of the pipeline: lifecycle hooks, the supervisor signal and
//! the [`ReloadPipeline`] that ties them to the restart policy.

pub mod command;
pub mod hooks;
pub mod pipeline;
pub mod signal;

pub use command::CommandHook;
pub use hooks::{BeforeReloadHooks, HookFuture, HookRegistry};
pub use pipeline::{ReloadOutcome, ReloadPipeline};
pub use signal::{
    DEBUG_ENV, MpscChannel, SignalChannel, SignalEmitter, StdoutChannel, WriterChannel,
    debug_attach_from_env,
};

// src/reload/hooks.rs

//! Before-reload lifecycle hooks.
//!
//! Hooks are registered on a [`HookRegistry`] during startup. Once the
//! pipeline is built the registry is frozen into [`BeforeReloadHooks`], an
//! immutable ordered list that is shared with the runtime.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{DevReloadError, Result};
use crate::reload::command::CommandHook;

/// Future returned by a hook invocation.
pub type HookFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

type HookFn = dyn Fn() -> HookFuture + Send + Sync;

/// Append-only list of hooks, open for registration until frozen.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<HookFn>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("len", &self.hooks.len())
            .finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register an async callback to run before every reload request.
    ///
    /// Hooks run in registration order.
    pub fn register_before_reload<F, Fut>(&mut self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.push(Box::new(move || -> HookFuture { Box::pin(hook()) }));
    }

    /// Register a shell command as a hook; see [`CommandHook`].
    pub fn register_command(&mut self, cmd: impl Into<String>) {
        let hook = Arc::new(CommandHook::new(cmd));
        self.register_before_reload(move || {
            let hook = Arc::clone(&hook);
            async move { hook.run().await }
        });
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Close registration.
    pub fn freeze(self) -> BeforeReloadHooks {
        BeforeReloadHooks {
            hooks: Arc::from(self.hooks),
        }
    }
}

/// Frozen, ordered hook list. Cloning shares the same list.
#[derive(Clone)]
pub struct BeforeReloadHooks {
    hooks: Arc<[Box<HookFn>]>,
}

impl fmt::Debug for BeforeReloadHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeforeReloadHooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}

impl Default for BeforeReloadHooks {
    fn default() -> Self {
        HookRegistry::new().freeze()
    }
}

impl BeforeReloadHooks {
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in order, each to completion before the next starts.
    ///
    /// The first failure stops the run and is returned to the caller. There
    /// is no timeout: a hook that never completes stalls the reload.
    pub async fn run_all(&self) -> Result<()> {
        for (index, hook) in self.hooks.iter().enumerate() {
            debug!(index, total = self.hooks.len(), "running before-reload hook");
            hook()
                .await
                .map_err(|source| DevReloadError::HookFailed { index, source })?;
        }
        Ok(())
    }
}

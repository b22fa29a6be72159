// src/reload/command.rs

//! Shell-command hooks declared in `before_reload = [...]`.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// A before-reload hook that runs one shell command to completion.
///
/// The command runs through `sh -c` (`cmd /C` on Windows). Its stdout and
/// stderr are forwarded to the log, never to our own stdout, which carries
/// the supervisor messages. A non-zero exit status fails the hook.
#[derive(Debug, Clone)]
pub struct CommandHook {
    cmd: String,
}

impl CommandHook {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    pub async fn run(&self) -> Result<()> {
        info!(cmd = %self.cmd, "running before-reload command");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning before-reload command '{}'", self.cmd))?;

        // Consume both pipes so the child never blocks on a full buffer.
        let mut forwarders = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            let label = self.cmd.clone();
            forwarders.push(tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    info!(cmd = %label, "stdout: {}", line);
                }
            }));
        }
        if let Some(stderr) = child.stderr.take() {
            let label = self.cmd.clone();
            forwarders.push(tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(cmd = %label, "stderr: {}", line);
                }
            }));
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for before-reload command '{}'", self.cmd))?;

        for forwarder in forwarders {
            let _ = forwarder.await;
        }

        if !status.success() {
            bail!(
                "command '{}' exited with status {}",
                self.cmd,
                status.code().unwrap_or(-1)
            );
        }

        debug!(cmd = %self.cmd, "before-reload command finished");
        Ok(())
    }
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     argv, cwd, env, stdio
//!              |
//!              v
//!          spawn() --> run_child()
//!              |
//!              v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE or interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr, interrupted }
//! ```

use crate::error::{ProcessError, Result, RunnerError};
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The executable cannot be found or spawned.
    /// - The process exits with a non-zero status (and `ALLOW_FAILURE` is not set).
    pub async fn run(self) -> Result<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and the output is
    /// returned with `interrupted = true`; no exit-code check is applied.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aqi_runner::core::process::builder::ProcessBuilder;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # async fn demo() -> anyhow::Result<()> {
    /// let token = CancellationToken::new();
    /// let output = ProcessBuilder::new("python")
    ///     .args(["run_training.py", "--use-hopsworks"])
    ///     .run_with_cancellation(token)
    ///     .await?;
    /// assert!(output.success());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self.spawn(&cmd_line)?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child, token).await?;

        if !output.is_interrupted()
            && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && output.exit_code() != 0
        {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(RunnerError::from(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
                stderr: output.stderr().to_string(),
            })
            .into());
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    fn spawn(&self, cmd_line: &str) -> Result<Child> {
        self.build_command().spawn().map_err(|source| {
            let err = if source.kind() == ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.to_string(),
                    source,
                }
            };
            RunnerError::from(err).into()
        })
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.arguments());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            command.envs(env.iter());
        }

        command.stdin(Stdio::null());
        command.stdout(Self::stdio_from_flags(self.stdout_stream()));
        command.stderr(Self::stdio_from_flags(self.stderr_stream()));
        command.kill_on_drop(true);

        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}

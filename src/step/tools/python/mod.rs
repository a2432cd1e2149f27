// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Python script runner.
//!
//! ```text
//! python.interpreter --(path-like)--> used as-is (relative to root)
//!                    --(bare name)--> PATH lookup, then python3, python
//!
//! interpreter script.py args...
//!   cwd = paths.root
//!   env = context env + PYTHONPATH (root prepended) + PYTHONUNBUFFERED=1
//! ```
//!
//! The command is always an argument vector; nothing is parsed by a shell.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::{debug, info, warn};

use super::Tool;
use crate::core::env::container::Env;
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::error::{ProcessError, Result, StepError};
use crate::step::StepContext;

/// Interpreter names tried when the configured one is not on PATH.
const FALLBACK_INTERPRETERS: [&str; 2] = ["python3", "python"];

/// Runs one Python script with arguments.
///
/// # Example
///
/// ```ignore
/// let tool = PythonTool::new("run_training.py")
///     .args(["--use-hopsworks", "--days-back", "30"]);
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PythonTool {
    script: PathBuf,
    args: Vec<String>,
    label: Option<String>,
}

impl PythonTool {
    #[must_use]
    pub fn new(script: impl AsRef<Path>) -> Self {
        Self {
            script: script.as_ref().to_path_buf(),
            args: Vec::new(),
            label: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Name used for the process in logs and errors.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Script path resolved against `paths.root`.
    #[must_use]
    pub fn script_path(&self, ctx: &StepContext) -> PathBuf {
        ctx.config().paths.resolve_path(&self.script)
    }

    fn resolve_interpreter(ctx: &StepContext) -> Result<PathBuf> {
        let configured = ctx.config().python.interpreter.as_str();
        let as_path = Path::new(configured);

        if as_path.is_absolute() || as_path.components().count() > 1 {
            return Ok(ctx.config().paths.resolve_path(as_path));
        }

        let found = ProcessBuilder::find(configured).or_else(|| {
            FALLBACK_INTERPRETERS
                .iter()
                .filter(|name| **name != configured)
                .find_map(|name| ProcessBuilder::find(name))
        });

        match found {
            Some(path) => {
                debug!(interpreter = %path.display(), "resolved python interpreter");
                Ok(path)
            }
            // A dry run only prints the command; keep the configured name.
            None if ctx.is_dry_run() => Ok(PathBuf::from(configured)),
            None => Err(ProcessError::ExecutableNotFound {
                name: configured.to_string(),
            }
            .into()),
        }
    }

    /// Environment for the child: the context env plus Python settings.
    #[must_use]
    pub fn child_env(ctx: &StepContext) -> Env {
        let mut env = ctx.env().clone();
        let config = ctx.config();

        if config.python.set_pythonpath {
            let root = config.paths.root.to_string_lossy().into_owned();
            let pythonpath = match env.get("PYTHONPATH").filter(|v| !v.is_empty()) {
                Some(existing) => {
                    let mut entries = vec![PathBuf::from(&root)];
                    entries.extend(std::env::split_paths(existing));
                    std::env::join_paths(entries)
                        .map_or(root, |joined| joined.to_string_lossy().into_owned())
                }
                None => root,
            };
            env.set("PYTHONPATH", pythonpath);
        }

        env.set("PYTHONUNBUFFERED", "1");
        env
    }

    /// Builds the process without running it.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when no interpreter can be
    /// found outside of a dry run.
    pub fn command(&self, ctx: &StepContext) -> Result<ProcessBuilder> {
        let interpreter = Self::resolve_interpreter(ctx)?;
        let script = self.script_path(ctx);
        let name = self.label.clone().unwrap_or_else(|| {
            self.script
                .file_name()
                .map_or_else(|| "python".to_string(), |n| n.to_string_lossy().into_owned())
        });

        let builder = ProcessBuilder::new(interpreter)
            .arg(script)
            .args(&self.args)
            .cwd(&ctx.config().paths.root)
            .env(Self::child_env(ctx))
            .name(name);

        Ok(if ctx.config().python.capture_output {
            builder
                .stdout_flags(StreamFlags::FORWARD_TO_LOG)
                .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        } else {
            builder.inherit_stdio()
        })
    }
}

impl Tool for PythonTool {
    fn name(&self) -> &'static str {
        "python"
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let script = self.script_path(ctx);
            let command = self.command(ctx)?;

            if ctx.is_dry_run() {
                if !script.is_file() {
                    warn!(script = %script.display(), "[dry-run] script not found");
                }
                info!(cmd = %command.command_line(), "[dry-run] would run");
                return Ok(());
            }

            if !script.is_file() {
                anyhow::bail!("script not found: {}", script.display());
            }

            info!(cmd = %command.command_line(), "running");
            let label = command.display_name();
            let output = command
                .run_with_cancellation(ctx.cancel_token().clone())
                .await?;

            if output.is_interrupted() {
                return Err(StepError::Interrupted(label).into());
            }

            Ok(())
        })
    }
}

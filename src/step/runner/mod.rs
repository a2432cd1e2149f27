// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential step runner.
//!
//! ```text
//! StepRunner::new(config, env)
//!   .with_dry_run()  .add(step)
//!   .run().await --> RunReport
//!
//! per step:  Pending --> Running --> Ok
//!                                \-> Failed  (remaining steps stay Pending)
//!            Pending --> Skipped           (step disabled)
//! ```

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::core::env::container::Env;
use crate::error::{Result, RunnerError, StepError};

use super::{Runnable, StepContext};

/// Lifecycle state of a step within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Pending,
    Running,
    Ok,
    Failed,
    Skipped,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    name: String,
    state: StepState,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    elapsed_ms: u64,
}

impl StepReport {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: StepState::Pending,
            message: None,
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn state(&self) -> StepState {
        self.state
    }

    /// Failure message, set only for failed steps.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

/// Outcome of a whole run, in step order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    steps: Vec<StepReport>,
}

impl RunReport {
    #[must_use]
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// True when no step failed and none was left pending.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.steps
            .iter()
            .all(|s| matches!(s.state, StepState::Ok | StepState::Skipped))
    }

    /// The step that halted the run, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.state == StepState::Failed)
    }

    /// Converts the report into a result.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Failed` naming the failed step.
    pub fn into_result(self) -> Result<()> {
        match self.failed_step() {
            Some(failed) => Err(RunnerError::from(StepError::Failed {
                step: failed.name.clone(),
                message: failed.message.clone().unwrap_or_default(),
            })
            .into()),
            None => Ok(()),
        }
    }
}

/// Runs steps one after another, halting on the first failure.
pub struct StepRunner {
    steps: Vec<Box<dyn Runnable>>,
    cancel_token: CancellationToken,
    config: Arc<Config>,
    env: Env,
    dry_run: bool,
}

impl StepRunner {
    #[must_use]
    pub fn new(config: Arc<Config>, env: Env) -> Self {
        Self {
            steps: Vec::new(),
            cancel_token: CancellationToken::new(),
            config,
            env,
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Adds a step to the end of the sequence.
    pub fn add(&mut self, step: impl Runnable + 'static) {
        self.steps.push(Box::new(step));
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the cancellation token shared with every step.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Cancels the running step; no further steps start.
    pub fn interrupt_all(&self) {
        info!("interrupting pipeline");
        self.cancel_token.cancel();
    }

    fn create_context(&self) -> StepContext {
        StepContext::new(
            Arc::clone(&self.config),
            self.env.clone(),
            self.cancel_token.clone(),
        )
        .with_dry_run(self.dry_run)
    }

    /// Runs the steps in order until one fails.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport {
            steps: self
                .steps
                .iter()
                .map(|step| StepReport::pending(step.name()))
                .collect(),
        };

        if self.steps.is_empty() {
            debug!("no steps to run");
            return report;
        }

        let ctx = self.create_context();
        let total = self.steps.len();

        for (i, (step, entry)) in self.steps.iter().zip(report.steps.iter_mut()).enumerate() {
            if self.is_cancelled() {
                let message = StepError::Interrupted(step.name().to_string()).to_string();
                error!(step = %step.name(), error = %message, "FAIL");
                entry.state = StepState::Failed;
                entry.message = Some(message);
                break;
            }

            if !step.enabled(&ctx) {
                info!(step = %step.name(), "skipped (disabled)");
                entry.state = StepState::Skipped;
                continue;
            }

            info!(step = %step.name(), index = i + 1, total, "running step");
            entry.state = StepState::Running;
            let started = Instant::now();
            let outcome = step.run(&ctx).await;
            entry.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match outcome {
                Ok(()) => {
                    entry.state = StepState::Ok;
                    info!(step = %step.name(), elapsed_ms = entry.elapsed_ms, "OK");
                }
                Err(e) => {
                    let message = format!("{e:#}");
                    error!(step = %step.name(), error = %message, "FAIL");
                    entry.state = StepState::Failed;
                    entry.message = Some(message);
                    break;
                }
            }
        }

        if report.is_success() {
            info!(total, "all steps completed");
        }
        report
    }

    /// Runs the steps and converts the report into a result.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Failed` for the first step that fails.
    pub async fn run_all(&self) -> Result<()> {
        self.run().await.into_result()
    }
}

#[cfg(test)]
mod tests;

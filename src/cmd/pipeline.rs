// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline command implementation.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use super::list::step_registry;
use super::{Session, run_interruptible};
use crate::cli::pipeline::PipelineArgs;
use crate::config::Config;
use crate::error::{Result, RunnerError, StepError};
use crate::step::runner::{RunReport, StepRunner};
use crate::step::steps::{StepOverrides, builtin_step};

/// Resolves the steps to run: the given patterns, or `pipeline.steps`.
///
/// # Errors
///
/// Returns an error for invalid globs, or when nothing resolves.
pub fn resolve_steps(patterns: &[String], config: &Config) -> Result<Vec<String>> {
    let registry = step_registry(config);
    let patterns: &[String] = if patterns.is_empty() {
        &config.pipeline.steps
    } else {
        patterns
    };

    let names = registry.resolve(patterns)?;
    if names.is_empty() {
        return Err(RunnerError::from(StepError::NotFound(patterns.join(" "))).into());
    }
    info!(steps = ?names, "resolved steps to run");
    Ok(names)
}

/// Builds a runner holding the resolved steps.
///
/// # Errors
///
/// Returns an error if resolution fails.
pub fn build_runner(args: &PipelineArgs, session: &Session, dry_run: bool) -> Result<StepRunner> {
    let names = resolve_steps(&args.steps, &session.config)?;
    let mut runner = StepRunner::new(session.config.clone(), session.env.clone())
        .with_dry_run(dry_run);
    for name in &names {
        runner.add(builtin_step(name, &session.config, &StepOverrides::default())?);
    }
    Ok(runner)
}

/// Writes `report` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    std::fs::write(path, json + "\n")
        .map_err(RunnerError::from)
        .with_context(|| format!("failed to write run report to {}", path.display()))?;
    info!(path = %path.display(), "wrote run report");
    Ok(())
}

/// Main handler for pipeline command.
///
/// # Errors
///
/// Returns `StepError::Failed` for the first failing step, or an error if
/// the steps cannot be resolved or the report cannot be written.
pub async fn run_pipeline_command(
    args: &PipelineArgs,
    session: &Session,
    dry_run: bool,
) -> Result<()> {
    let runner = build_runner(args, session, dry_run)?;
    let report = run_interruptible(&runner).await;

    let written = args
        .report
        .as_deref()
        .map(|path| write_report(&report, path));

    // A step failure takes precedence over a report write failure.
    if let Some(Err(e)) = &written
        && !report.is_success()
    {
        warn!(error = %format!("{e:#}"), "run report not written");
    }
    report.into_result()?;
    written.transpose()?;
    Ok(())
}

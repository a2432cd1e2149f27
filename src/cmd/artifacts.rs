// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifacts command implementation.

use crate::cli::pipeline::ArtifactsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::step::steps::artifacts::list_artifacts;

/// Main handler for artifacts command.
///
/// # Errors
///
/// Returns an error if the models directory is missing or the pattern is invalid.
pub fn run_artifacts_command(args: &ArtifactsArgs, config: &Config) -> Result<()> {
    let pattern = args
        .pattern
        .as_deref()
        .unwrap_or(&config.pipeline.artifact_pattern);
    let artifacts = list_artifacts(config, pattern)?;

    if artifacts.is_empty() {
        println!("No model artifacts in {}", config.paths.models.display());
        return Ok(());
    }

    let width = artifacts
        .iter()
        .map(|a| a.size().to_string().len())
        .max()
        .unwrap_or(0);
    for artifact in &artifacts {
        println!("{:>width$}  {}", artifact.size(), artifact.path().display());
    }
    Ok(())
}

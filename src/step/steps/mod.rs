// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in pipeline steps.
//!
//! ```text
//! verify     scripts.verify   (feature store connectivity)
//! fetch      scripts.fetch    (data refresh)
//! train      training.script  + TrainingArgs
//! models     scripts.models   (model registry check)
//! artifacts  list files under paths.models
//! ```

pub mod artifacts;
pub mod script;
pub mod train;

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, RunnerError, StepError};
use crate::step::Step;
use crate::step::tools::training::{TrainingArgs, TrainingInvocation};

use artifacts::ArtifactsStep;
use script::ScriptStep;
use train::TrainStep;

/// Names of the built-in steps in canonical order.
pub const BUILTIN_STEPS: [&str; 5] = ["verify", "fetch", "train", "models", "artifacts"];

/// Command-line overrides applied when building steps.
#[derive(Debug, Clone, Default)]
pub struct StepOverrides {
    /// Replaces the training arguments derived from `[training]`.
    pub training: Option<TrainingArgs>,
    /// Replaces `pipeline.artifact_pattern`.
    pub artifact_pattern: Option<String>,
}

/// Builds the built-in step called `name`.
///
/// # Errors
///
/// Returns `StepError::NotFound` for unknown names.
pub fn builtin_step(name: &str, config: &Config, overrides: &StepOverrides) -> Result<Step> {
    let step = match name {
        "verify" => script_step("verify", &config.scripts.verify, config),
        "fetch" => script_step("fetch", &config.scripts.fetch, config),
        "models" => script_step("models", &config.scripts.models, config),
        "train" => {
            let args = overrides.training.clone().unwrap_or_else(|| {
                TrainingInvocation::from_config(&config.training).into()
            });
            Step::Train(TrainStep::new(args))
        }
        "artifacts" => {
            let pattern = overrides
                .artifact_pattern
                .clone()
                .unwrap_or_else(|| config.pipeline.artifact_pattern.clone());
            Step::Artifacts(ArtifactsStep::new(pattern))
        }
        other => return Err(RunnerError::from(StepError::NotFound(other.to_string())).into()),
    };
    Ok(step)
}

fn script_step(name: &str, script: &Path, config: &Config) -> Step {
    Step::Script(
        ScriptStep::new(name, script).with_args(config.scripts.args_for(name).iter().cloned()),
    )
}

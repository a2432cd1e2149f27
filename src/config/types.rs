// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, PythonConfig, PathsConfig, TrainingConfig,
//!         ScriptsConfig, PipelineConfig
//! Aliases: alias name -> [step list]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default lookback window, in days, for feature-store training data.
pub const DEFAULT_DAYS_BACK: u32 = 30;
/// Default prediction target.
pub const DEFAULT_TARGET: &str = "pollutant_aqi";
/// Default local training data file.
pub const DEFAULT_DATA_FILE: &str = "data/ml_training_data_1year.csv";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log commands instead of running them.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Python interpreter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PythonConfig {
    /// Interpreter name (looked up in `PATH`) or path.
    pub interpreter: String,
    /// Capture script output into the log instead of the terminal.
    ///
    /// The last line of captured stderr ends the failure message of a step.
    pub capture_output: bool,
    /// Prepend `paths.root` to `PYTHONPATH` for every script.
    pub set_pythonpath: bool,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            capture_output: false,
            set_pythonpath: true,
        }
    }
}

/// Training program settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Training entry point, relative to `paths.root`.
    pub script: PathBuf,
    /// Fetch training data from the feature store instead of a local file.
    pub use_feature_store: bool,
    /// Feature-store lookback window in days.
    pub days_back: u32,
    /// Prediction target label.
    pub target: String,
    /// Local training data file.
    pub data: PathBuf,
    /// Arguments used by `forward` when none are given.
    ///
    /// Empty means the feature-store defaults.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_args: Vec<String>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("run_training.py"),
            use_feature_store: false,
            days_back: DEFAULT_DAYS_BACK,
            target: DEFAULT_TARGET.to_string(),
            data: PathBuf::from(DEFAULT_DATA_FILE),
            default_args: Vec::new(),
        }
    }
}

/// Helper scripts run by pipeline steps, relative to `paths.root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Feature-store connectivity check.
    pub verify: PathBuf,
    /// Feature pipeline (fetch and store data).
    pub fetch: PathBuf,
    /// Model registry listing.
    pub models: PathBuf,
    /// Extra arguments per script step, e.g. `fetch = ["--backfill"]`.
    pub args: BTreeMap<String, Vec<String>>,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            verify: PathBuf::from("scripts/verify_hopsworks.py"),
            fetch: PathBuf::from("src/main.py"),
            models: PathBuf::from("modeling/test_model_registry.py"),
            args: BTreeMap::new(),
        }
    }
}

impl ScriptsConfig {
    /// Steps that run a script from this section.
    pub const STEPS: [&str; 3] = ["verify", "fetch", "models"];

    /// Arguments configured for the script step `name`.
    #[must_use]
    pub fn args_for(&self, name: &str) -> &[String] {
        self.args.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Pipeline step selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Steps run by `pipeline` when no step is named on the command line.
    pub steps: Vec<String>,
    /// Glob applied to files under `paths.models` by the `artifacts` step.
    pub artifact_pattern: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: ["verify", "fetch", "train", "models", "artifacts"]
                .into_iter()
                .map(String::from)
                .collect(),
            artifact_pattern: "**/*".to_string(),
        }
    }
}

/// Step aliases: name -> list of step names or glob patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. aqi.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. AQI_* variables from the loaded environment
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! AQI_TRAINING__DAYS_BACK=60       → training.days_back = 60
//! AQI_PYTHON__INTERPRETER=python3  → python.interpreter = "python3"
//! AQI_PATHS__ROOT=/srv/aqi         → paths.root = "/srv/aqi"
//! ```
//!
//! # Aliases
//!
//! ```toml
//! [aliases]
//! refresh = ["fetch", "train"]
//! report = ["models", "artifacts"]
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result, RunnerError};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{
    Aliases, GlobalConfig, PipelineConfig, PythonConfig, ScriptsConfig, TrainingConfig,
};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub python: PythonConfig,
    pub paths: PathsConfig,
    pub training: TrainingConfig,
    pub scripts: ScriptsConfig,
    pub pipeline: PipelineConfig,
    /// Step aliases.
    pub aliases: Aliases,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aqi_runner::config::Config;
    /// use aqi_runner::core::env::current_env;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("aqi.toml")
    ///     .with_env_source("AQI", &current_env())
    ///     .set("training.days_back", "60")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths against `paths.root` and validate values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty interpreter or
    /// target, a zero lookback window, an unresolvable root, or script
    /// arguments for a step that runs no script.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;

        if self.python.interpreter.trim().is_empty() {
            return Err(invalid("python", "interpreter", "must not be empty"));
        }
        if self.training.days_back == 0 {
            return Err(invalid("training", "days_back", "must be at least 1"));
        }
        if self.training.target.trim().is_empty() {
            return Err(invalid("training", "target", "must not be empty"));
        }
        if let Some(name) = self
            .scripts
            .args
            .keys()
            .find(|name| !ScriptsConfig::STEPS.contains(&name.as_str()))
        {
            return Err(invalid(
                "scripts.args",
                name,
                "not a script step (expected verify, fetch or models)",
            ));
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One `key = value` line per option, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_python_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_training_options(&mut options);
        self.format_scripts_options(&mut options);
        self.format_pipeline_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_python_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "python.interpreter".into(),
            self.python.interpreter.clone(),
        );
        options.insert(
            "python.capture_output".into(),
            self.python.capture_output.to_string(),
        );
        options.insert(
            "python.set_pythonpath".into(),
            self.python.set_pythonpath.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.root".into(), self.paths.root.display().to_string());
        options.insert(
            "paths.models".into(),
            self.paths.models.display().to_string(),
        );
    }

    fn format_training_options(&self, options: &mut BTreeMap<String, String>) {
        let training = &self.training;
        options.insert(
            "training.script".into(),
            training.script.display().to_string(),
        );
        options.insert(
            "training.use_feature_store".into(),
            training.use_feature_store.to_string(),
        );
        options.insert(
            "training.days_back".into(),
            training.days_back.to_string(),
        );
        options.insert("training.target".into(), training.target.clone());
        options.insert("training.data".into(), training.data.display().to_string());
        if !training.default_args.is_empty() {
            options.insert(
                "training.default_args".into(),
                training.default_args.join(" "),
            );
        }
    }

    fn format_scripts_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "scripts.verify".into(),
            self.scripts.verify.display().to_string(),
        );
        options.insert(
            "scripts.fetch".into(),
            self.scripts.fetch.display().to_string(),
        );
        options.insert(
            "scripts.models".into(),
            self.scripts.models.display().to_string(),
        );
        for (name, args) in &self.scripts.args {
            options.insert(format!("scripts.args.{name}"), args.join(" "));
        }
    }

    fn format_pipeline_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("pipeline.steps".into(), self.pipeline.steps.join(", "));
        options.insert(
            "pipeline.artifact_pattern".into(),
            self.pipeline.artifact_pattern.clone(),
        );
        for (name, targets) in &self.aliases {
            options.insert(format!("aliases.{name}"), targets.join(", "));
        }
    }
}

fn invalid(section: &str, key: &str, message: &str) -> anyhow::Error {
    RunnerError::from(ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    })
    .into()
}

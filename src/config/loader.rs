// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("aqi.toml")
//!   .add_toml_file(--config)
//!   .with_env_source("AQI", &env)     AQI_TRAINING__DAYS_BACK=60
//!   .set("training.target", ..)       --set overrides
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::{Path, PathBuf};

use super::Config;
use crate::core::env::container::Env;
use crate::error::{ConfigError, Result, RunnerError};
use anyhow::Context;
use config::{Environment, File, FileFormat};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_source: Option<(String, config::Map<String, String>)>,
    overrides: Vec<(String, String)>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_source: None,
            overrides: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file that must exist.
    ///
    /// The file is read when `build()` is called.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_SECTION__KEY` variables from `env`.
    ///
    /// The variables come from the given environment object, not from the
    /// live process environment, so values loaded from an env file apply.
    /// Prefixed variables without a `__` separator (like `AQI_ENV_FILE`)
    /// belong to the command line and are skipped.
    #[must_use]
    pub fn with_env_source(mut self, prefix: &str, env: &Env) -> Self {
        let full_prefix = format!("{prefix}_");
        let vars = env
            .with_prefix(&full_prefix)
            .into_iter()
            .filter(|(key, _)| key[full_prefix.len()..].contains("__"))
            .collect();
        self.env_source = Some((prefix.to_string(), vars));
        self
    }

    /// Adds a `--set section.key=value` style override.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Parses and adds a `section.key=value` override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the text has no `=` or an empty key.
    pub fn set_from_str(self, text: &str) -> Result<Self> {
        let (key, value) = text
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| {
                RunnerError::from(ConfigError::InvalidValue {
                    section: "--set".to_string(),
                    key: text.to_string(),
                    message: "expected section.key=value".to_string(),
                })
            })?;
        Ok(self.set(key, value))
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - Validation fails.
    pub fn build(self) -> Result<Config> {
        if let Some((_, missing)) = self
            .files
            .iter()
            .find(|(kind, path)| kind == "file" && !path.is_file())
        {
            return Err(
                RunnerError::from(ConfigError::NotFound(missing.display().to_string())).into(),
            );
        }
        let sources = self.describe_sources();

        let mut builder = match self.env_source {
            Some((prefix, vars)) => self.builder.add_source(
                Environment::with_prefix(&prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            ),
            None => self.builder,
        };

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.as_str())
                .with_context(|| format!("invalid override '{key}'"))?;
        }

        let parse_error = |e: config::ConfigError| {
            RunnerError::from(ConfigError::ParseError {
                sources: sources.clone(),
                message: e.to_string(),
            })
        };
        let cfg = builder.build().map_err(parse_error)?;
        let mut config: Config = cfg.try_deserialize().map_err(parse_error)?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    fn describe_sources(&self) -> String {
        let mut names: Vec<String> = self
            .files
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect();
        if self.env_source.is_some() {
            names.push("environment".to_string());
        }
        if !self.overrides.is_empty() {
            names.push("overrides".to_string());
        }
        if names.is_empty() {
            names.push("defaults".to_string());
        }
        names.join(", ")
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[(String, PathBuf)] {
        &self.files
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

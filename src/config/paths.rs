// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/                  project checkout (default: cwd)
//!   run_training.py      training.script
//!   data/...csv          training.data
//!   modeling/models/     models
//! ```
//!
//! Relative paths anywhere in the config are resolved against `root`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result, RunnerError};

/// Project paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root; scripts run with this as working directory.
    pub root: PathBuf,
    /// Directory holding trained model artifacts.
    pub models: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            models: PathBuf::from("modeling/models"),
        }
    }
}

impl PathsConfig {
    /// Makes `root` absolute and resolves `models` against it.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `root` is empty or the
    /// current directory cannot be determined.
    pub fn resolve(&mut self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(RunnerError::from(ConfigError::InvalidValue {
                section: "paths".to_string(),
                key: "root".to_string(),
                message: "must not be empty".to_string(),
            })
            .into());
        }

        if self.root.is_relative() {
            let cwd = std::env::current_dir().map_err(|e| {
                RunnerError::from(ConfigError::InvalidValue {
                    section: "paths".to_string(),
                    key: "root".to_string(),
                    message: format!("cannot resolve relative root: {e}"),
                })
            })?;
            self.root = normalize(&cwd.join(&self.root));
        }

        self.models = self.resolve_path(&self.models);
        Ok(())
    }

    /// Resolves `path` against `root` unless it is already absolute.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            normalize(&self.root.join(path))
        }
    }
}

/// Removes `.` components so resolved paths read cleanly in logs.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

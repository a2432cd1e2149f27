// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Model artifact listing.
//!
//! ```text
//! paths.models --(walk, skip caches)--> glob filter --> [Artifact { path, size }]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::step::{Runnable, StepContext};
use crate::utility::fs::walk::{WalkOptions, find_files};

/// A file found under the models directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    path: PathBuf,
    size: u64,
}

impl Artifact {
    /// Path relative to the models directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}

/// Lists files under `paths.models` matching `pattern`, sorted by path.
///
/// # Errors
///
/// Returns an error if the models directory does not exist or the pattern
/// is not a valid glob.
pub fn list_artifacts(config: &Config, pattern: &str) -> Result<Vec<Artifact>> {
    let models = &config.paths.models;
    if !models.is_dir() {
        anyhow::bail!("models directory not found: {}", models.display());
    }

    let files = find_files(models, pattern, &WalkOptions::for_artifacts())
        .with_context(|| format!("failed to list artifacts in {}", models.display()))?;

    files
        .into_iter()
        .map(|path| {
            let size = std::fs::metadata(&path)
                .with_context(|| format!("failed to stat {}", path.display()))?
                .len();
            let relative = path
                .strip_prefix(models)
                .map_or_else(|_| path.clone(), Path::to_path_buf);
            Ok(Artifact {
                path: relative,
                size,
            })
        })
        .collect()
}

/// Logs the trained model files.
#[derive(Debug, Clone)]
pub struct ArtifactsStep {
    pattern: String,
}

impl ArtifactsStep {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Runnable for ArtifactsStep {
    fn name(&self) -> &'static str {
        "artifacts"
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let config = ctx.config();
            let artifacts = list_artifacts(config, &self.pattern)?;

            if artifacts.is_empty() {
                warn!(
                    dir = %config.paths.models.display(),
                    pattern = %self.pattern,
                    "no model artifacts found"
                );
                return Ok(());
            }

            for artifact in &artifacts {
                info!(path = %artifact.path.display(), size = artifact.size, "artifact");
            }
            info!(count = artifacts.len(), "model artifacts");
            Ok(())
        })
    }
}

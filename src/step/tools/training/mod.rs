// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Argument assembly for the training program.
//!
//! ```text
//! FeatureStore { days_back }  --> --use-hopsworks --days-back 30 --target pollutant_aqi
//! LocalFile { path }          --> --data data/ml_training_data_1year.csv --target pollutant_aqi
//! Passthrough(tokens)         --> tokens, or the configured defaults when empty
//! ```
//!
//! Every value is a separate token; nothing is ever joined into a shell
//! string.

use std::path::PathBuf;

use crate::config::types::{DEFAULT_DAYS_BACK, DEFAULT_TARGET, TrainingConfig};

/// Where the training program reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingSource {
    /// Fetch the last `days_back` days from the feature store.
    FeatureStore { days_back: u32 },
    /// Read a local CSV file.
    LocalFile { path: PathBuf },
}

/// A typed training invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingInvocation {
    source: TrainingSource,
    target: String,
}

impl TrainingInvocation {
    #[must_use]
    pub fn new(source: TrainingSource, target: impl Into<String>) -> Self {
        Self {
            source,
            target: target.into(),
        }
    }

    /// Feature-store mode with the default lookback and target.
    #[must_use]
    pub fn feature_store_defaults() -> Self {
        Self::new(
            TrainingSource::FeatureStore {
                days_back: DEFAULT_DAYS_BACK,
            },
            DEFAULT_TARGET,
        )
    }

    /// Builds the invocation selected by the `[training]` section.
    #[must_use]
    pub fn from_config(config: &TrainingConfig) -> Self {
        let source = if config.use_feature_store {
            TrainingSource::FeatureStore {
                days_back: config.days_back,
            }
        } else {
            TrainingSource::LocalFile {
                path: config.data.clone(),
            }
        };
        Self::new(source, config.target.clone())
    }

    #[must_use]
    pub const fn source(&self) -> &TrainingSource {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the argument tokens, in the order the training program documents them.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = match &self.source {
            TrainingSource::FeatureStore { days_back } => vec![
                "--use-hopsworks".to_string(),
                "--days-back".to_string(),
                days_back.to_string(),
            ],
            TrainingSource::LocalFile { path } => {
                vec!["--data".to_string(), path_token(path)]
            }
        };
        args.push("--target".to_string());
        args.push(self.target.clone());
        args
    }
}

/// Arguments handed to the training program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingArgs {
    Structured(TrainingInvocation),
    /// Tokens forwarded verbatim.
    Passthrough(Vec<String>),
}

impl TrainingArgs {
    /// Forwards `tokens` unchanged, or substitutes the defaults when empty.
    ///
    /// The defaults are `training.default_args` when configured, otherwise
    /// the feature-store defaults.
    #[must_use]
    pub fn passthrough(tokens: Vec<String>, config: &TrainingConfig) -> Self {
        if !tokens.is_empty() {
            return Self::Passthrough(tokens);
        }
        if config.default_args.is_empty() {
            Self::Structured(TrainingInvocation::feature_store_defaults())
        } else {
            Self::Passthrough(config.default_args.clone())
        }
    }

    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Self::Structured(invocation) => invocation.to_args(),
            Self::Passthrough(tokens) => tokens.clone(),
        }
    }
}

impl From<TrainingInvocation> for TrainingArgs {
    fn from(invocation: TrainingInvocation) -> Self {
        Self::Structured(invocation)
    }
}

/// Renders a path with `/` separators; Python accepts them on every platform.
fn path_token(path: &std::path::Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}

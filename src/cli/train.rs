// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Training command arguments.
//!
//! ```text
//! train --use-hopsworks [--days-back N] [--target T]   feature store
//! train [--data PATH] [--target T]                     local CSV
//! train                                                [training] section
//! forward ARGS...                                      verbatim tokens
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::types::TrainingConfig;
use crate::step::tools::training::{TrainingArgs, TrainingInvocation, TrainingSource};

/// Arguments for the `train` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TrainArgs {
    /// Reads training data from the feature store.
    #[arg(long = "use-hopsworks", conflicts_with = "data")]
    pub use_hopsworks: bool,

    /// Days of feature store history to fetch.
    #[arg(long = "days-back", value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    pub days_back: Option<u32>,

    /// Column to predict.
    #[arg(long, value_name = "COLUMN")]
    pub target: Option<String>,

    /// Local CSV file with training data.
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

impl TrainArgs {
    /// Merges the flags over the `[training]` section.
    ///
    /// `--use-hopsworks` or `--days-back` select the feature store, `--data`
    /// selects a local file, otherwise the configured mode is kept.
    #[must_use]
    pub fn to_training_args(&self, config: &TrainingConfig) -> TrainingArgs {
        let feature_store = if self.data.is_some() {
            false
        } else {
            self.use_hopsworks || self.days_back.is_some() || config.use_feature_store
        };

        let source = if feature_store {
            TrainingSource::FeatureStore {
                days_back: self.days_back.unwrap_or(config.days_back),
            }
        } else {
            TrainingSource::LocalFile {
                path: self.data.clone().unwrap_or_else(|| config.data.clone()),
            }
        };

        let target = self.target.clone().unwrap_or_else(|| config.target.clone());
        TrainingInvocation::new(source, target).into()
    }
}

/// Arguments for the `forward` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ForwardArgs {
    /// Arguments passed unchanged to the training program.
    /// Without arguments the configured defaults are used.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl ForwardArgs {
    #[must_use]
    pub fn to_training_args(&self, config: &TrainingConfig) -> TrainingArgs {
        TrainingArgs::passthrough(self.args.clone(), config)
    }
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline, list, artifacts and env command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `pipeline` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PipelineArgs {
    /// Steps to run. Aliases and globs like 'f*' are supported.
    /// Defaults to pipeline.steps.
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,

    /// Writes a JSON run report to FILE.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Shows only aliases.
    #[arg(short = 'i', long)]
    pub aliases: bool,

    /// When given, shows only the steps these patterns resolve to.
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,
}

/// Arguments for the `artifacts` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ArtifactsArgs {
    /// Glob matched against paths relative to the models directory.
    #[arg(short = 'p', long, value_name = "GLOB")]
    pub pattern: Option<String>,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, Args)]
pub struct EnvArgs {
    /// Prints values as well as keys.
    #[arg(long)]
    pub values: bool,
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for aqi-runner using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! aqi [global options] <command>
//! version | options | configs
//! env [--values]
//! list [--aliases] [steps...]
//! train [--use-hopsworks] [--days-back N] [--target T] [--data PATH]
//! forward [args...]
//! artifacts [--pattern GLOB]
//! pipeline [steps...] [--report FILE]
//! ```

pub mod global;
pub mod pipeline;
pub mod train;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::pipeline::{ArtifactsArgs, EnvArgs, ListArgs, PipelineArgs};
use crate::cli::train::{ForwardArgs, TrainArgs};
use clap::{Parser, Subcommand};

/// AQI Training Pipeline Runner
///
/// Loads an environment file and runs the AQI training pipeline steps.
#[derive(Debug, Parser)]
#[command(
    name = "aqi",
    author,
    version,
    about = "AQI Training Pipeline Runner",
    long_about = "aqi-runner Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs the AQI forecasting pipeline: feature store checks, data\n\
                  refresh, model training and model registry checks.\n\n\
                  `aqi pipeline` runs every configured step and stops at the first\n\
                  failure. `aqi train --use-hopsworks` only trains. See\n\
                  `aqi <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  The environment file (default .env) is read first. Its values are\n\
                  passed to every script and never written to the process\n\
                  environment. Settings are then read from `aqi.toml` in the\n\
                  current directory, any --config files, AQI_SECTION__KEY variables\n\
                  from the environment file or process, and finally --set options."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Shows the variables loaded from the environment file.
    Env(EnvArgs),

    /// Lists available steps.
    List(ListArgs),

    /// Runs the training program.
    Train(TrainArgs),

    /// Runs the training program with raw arguments.
    Forward(ForwardArgs),

    /// Lists trained model files.
    Artifacts(ArtifactsArgs),

    /// Runs pipeline steps in order, stopping at the first failure.
    Pipeline(PipelineArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

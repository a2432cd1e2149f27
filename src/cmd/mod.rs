// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! GlobalOptions --> load_session()
//!   current_env() + env file --> Env
//!   aqi.toml, --config, AQI_* (from Env), --set --> Config
//!
//! CLI args + Session --> cmd::run_* handlers
//!   config, list, train, artifacts, pipeline
//! ```

pub mod artifacts;
pub mod config;
pub mod list;
pub mod pipeline;
pub mod train;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::envfile::{EnvFile, EnvFileLoader};
use crate::error::Result;
use crate::step::runner::{RunReport, StepRunner};

/// Optional configuration file read from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "aqi.toml";

/// Prefix of configuration variables (`AQI_TRAINING__DAYS_BACK`).
pub const ENV_PREFIX: &str = "AQI";

/// Everything loaded before a command runs.
#[derive(Debug, Clone)]
pub struct Session {
    /// The parsed environment file.
    pub env_file: EnvFile,
    /// Process environment with the env file applied on top.
    pub env: Env,
    pub config: Arc<Config>,
}

/// Loads the environment file into a copy of the process environment.
///
/// # Errors
///
/// Returns an error if the file is required and missing, unreadable, or
/// malformed in strict mode.
pub fn load_env(global: &GlobalOptions) -> Result<(EnvFile, Env)> {
    let mut env = current_env();
    let env_file = EnvFileLoader::new(&global.env_file)
        .required(global.require_env)
        .strict(global.strict_env)
        .load_into(&mut env)?;
    Ok((env_file, env))
}

/// Builds the layered config loader for `global`, reading `AQI_*` from `env`.
///
/// # Errors
///
/// Returns an error if a `--set` option is not `section.key=value`.
pub fn config_loader(global: &GlobalOptions, env: &Env) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_source(ENV_PREFIX, env);
    for option in global.to_config_overrides() {
        loader = loader.set_from_str(&option)?;
    }
    Ok(loader)
}

/// Loads the env file, then the configuration.
///
/// # Errors
///
/// Returns an error if either the env file or the configuration fails to load.
pub fn load_session(global: &GlobalOptions) -> Result<Session> {
    let (env_file, env) = load_env(global)?;
    let config = config_loader(global, &env)?.build()?;
    Ok(Session {
        env_file,
        env,
        config: Arc::new(config),
    })
}

/// Cancels `token` when Ctrl+C is pressed.
pub(crate) fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("received Ctrl+C, interrupting pipeline");
            token.cancel();
        }
    });
}

/// Runs `runner` with Ctrl+C wired to its cancellation token.
pub(crate) async fn run_interruptible(runner: &StepRunner) -> RunReport {
    cancel_on_ctrl_c(runner.cancel_token());
    runner.run().await
}

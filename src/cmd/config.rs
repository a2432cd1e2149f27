// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config and environment inspection commands.

use tracing::warn;

use super::{config_loader, load_env};
use crate::cli::global::GlobalOptions;
use crate::cli::pipeline::EnvArgs;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::envfile::EnvFile;
use crate::error::Result;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Numbered sources in load order: the env file first, then TOML files.
#[must_use]
pub fn format_config_sources(env_file: &EnvFile, loader: &ConfigLoader) -> Vec<String> {
    env_file
        .path()
        .map(|path| ("env", path))
        .into_iter()
        .chain(
            loader
                .loaded_files()
                .iter()
                .map(|(kind, path)| (kind.as_str(), path.as_path())),
        )
        .enumerate()
        .map(|(i, (kind, path))| format!("{}. [{kind}] {}", i + 1, path.display()))
        .collect()
}

/// Display the env file and configuration files that were loaded.
///
/// # Errors
///
/// Returns an error if the env file or an override fails to load.
pub fn run_configs_command(global: &GlobalOptions) -> Result<()> {
    let (env_file, env) = load_env(global)?;
    let loader = config_loader(global, &env)?;
    let lines = format_config_sources(&env_file, &loader);
    if lines.is_empty() {
        println!("No configuration files loaded");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed by `env`: keys in file order, with values when asked.
#[must_use]
pub fn format_env_file(env_file: &EnvFile, values: bool) -> Vec<String> {
    let map = env_file.to_map();
    env_file
        .keys()
        .into_iter()
        .map(|key| match map.get(key) {
            Some(value) if values => format!("{key}={value}"),
            _ => key.to_string(),
        })
        .collect()
}

/// Display the variables loaded from the environment file.
pub fn run_env_command(args: &EnvArgs, env_file: &EnvFile) {
    let Some(path) = env_file.path() else {
        println!("No env file loaded");
        return;
    };

    println!("# {}", path.display());
    for line in format_env_file(env_file, args.values) {
        println!("{line}");
    }

    for rejected in env_file.rejected() {
        warn!(line = rejected.line(), content = %rejected.content(), "skipped malformed line");
    }
}

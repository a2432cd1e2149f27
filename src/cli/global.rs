// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --env-file FILE   ← KEY=VALUE file loaded before config (default .env)
//! --config FILE     ← Additional TOML config file(s) (can repeat)
//! --set KEY=VAL     ← Direct config override
//! --dry             ← Print commands instead of running them
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//!
//! Precedence: CLI flags > --set > AQI_* > --config > aqi.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Default environment file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Global options available for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Environment file with KEY=VALUE lines.
    #[arg(
        short = 'e',
        long = "env-file",
        value_name = "FILE",
        env = "AQI_ENV_FILE",
        default_value = DEFAULT_ENV_FILE
    )]
    pub env_file: PathBuf,

    /// Fails when the environment file does not exist.
    #[arg(long = "require-env")]
    pub require_env: bool,

    /// Fails on malformed lines in the environment file instead of skipping them.
    #[arg(long = "strict-env")]
    pub strict_env: bool,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Sets an option, such as 'training.days_back=60'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Prints the commands that would run without running them.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            require_env: false,
            strict_env: false,
            configs: Vec::new(),
            options: Vec::new(),
            dry: false,
            log_level: None,
            file_log_level: None,
            log_file: None,
        }
    }
}

impl GlobalOptions {
    /// Converts command-line options to `section.key=value` overrides.
    ///
    /// `--set` values come first so explicit flags win over them.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global.dry=true".to_string());
        }

        overrides
    }
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> env file --> Config --> Command Dispatch
//!   Train | Forward | Pipeline | Artifacts | List | Env | Options
//! ```

use std::process::ExitCode;

use aqi_runner::cli::global::GlobalOptions;
use aqi_runner::cli::{self, Command};
use aqi_runner::cmd::artifacts::run_artifacts_command;
use aqi_runner::cmd::config::{run_configs_command, run_env_command, run_options_command};
use aqi_runner::cmd::list::run_list_command;
use aqi_runner::cmd::pipeline::run_pipeline_command;
use aqi_runner::cmd::train::{run_forward_command, run_train_command};
use aqi_runner::cmd::{Session, load_session};
use aqi_runner::error::bail_out;
use aqi_runner::logging::init_logging;
use aqi_runner::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Configs) => run_configs_command(global),
        Some(Command::Options) => {
            load_session(global).map(|session| run_options_command(&session.config))
        }
        Some(Command::Env(args)) => {
            load_session(global).map(|session| run_env_command(args, &session.env_file))
        }
        Some(Command::List(args)) => {
            load_session(global).and_then(|session| run_list_command(args, &session.config))
        }
        Some(Command::Artifacts(args)) => {
            load_session(global).and_then(|session| run_artifacts_command(args, &session.config))
        }
        Some(Command::Train(args)) => match load_session(global) {
            Ok(session) => run_train_command(args, &session, dry_run(global, &session)).await,
            Err(e) => Err(e),
        },
        Some(Command::Forward(args)) => match load_session(global) {
            Ok(session) => run_forward_command(args, &session, dry_run(global, &session)).await,
            Err(e) => Err(e),
        },
        Some(Command::Pipeline(args)) => match load_session(global) {
            Ok(session) => run_pipeline_command(args, &session, dry_run(global, &session)).await,
            Err(e) => Err(e),
        },
        None => Err(bail_out("no command specified, use --help for usage information").into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn dry_run(global: &GlobalOptions, session: &Session) -> bool {
    global.dry || session.config.global.dry
}

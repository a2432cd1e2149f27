// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::global::GlobalOptions;
use crate::cli::{Cli, Command};
use crate::config::types::TrainingConfig;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["aqi", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "aqi",
        "-e",
        "prod.env",
        "--strict-env",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "-s",
        "training.days_back=60",
        "-l",
        "4",
        "--dry",
        "pipeline",
    ])
    .unwrap();

    assert_eq!(cli.global.env_file, PathBuf::from("prod.env"));
    assert!(cli.global.strict_env);
    assert!(!cli.global.require_env);
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    insta::assert_yaml_snapshot!(cli.global.to_config_overrides(), @r"
    - training.days_back=60
    - global.output_log_level=4
    - global.file_log_level=4
    - global.dry=true
    ");
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["aqi", "-l", "6", "version"]).is_err());
}

#[test]
fn test_default_overrides_empty() {
    assert!(GlobalOptions::default().to_config_overrides().is_empty());
}

#[test]
fn test_parse_train_feature_store() {
    let cli = Cli::try_parse_from([
        "aqi",
        "train",
        "--use-hopsworks",
        "--days-back",
        "45",
        "--target",
        "pm25",
    ])
    .unwrap();
    let Some(Command::Train(args)) = cli.command else {
        panic!("expected train command");
    };

    let training = args.to_training_args(&TrainingConfig::default());
    insta::assert_snapshot!(
        training.to_args().join(" "),
        @"--use-hopsworks --days-back 45 --target pm25"
    );
}

#[test]
fn test_parse_train_data_file() {
    let cli = Cli::try_parse_from(["aqi", "train", "--data", "data/march.csv"]).unwrap();
    let Some(Command::Train(args)) = cli.command else {
        panic!("expected train command");
    };

    let config = TrainingConfig {
        use_feature_store: true,
        ..TrainingConfig::default()
    };
    insta::assert_snapshot!(
        args.to_training_args(&config).to_args().join(" "),
        @"--data data/march.csv --target pollutant_aqi"
    );
}

#[test]
fn test_train_days_back_implies_feature_store() {
    let cli = Cli::try_parse_from(["aqi", "train", "--days-back", "7"]).unwrap();
    let Some(Command::Train(args)) = cli.command else {
        panic!("expected train command");
    };
    assert_eq!(
        args.to_training_args(&TrainingConfig::default()).to_args()[0],
        "--use-hopsworks"
    );
}

#[test]
fn test_train_rejects_hopsworks_with_data() {
    let result = Cli::try_parse_from(["aqi", "train", "--use-hopsworks", "--data", "x.csv"]);
    assert!(result.is_err());
}

#[test]
fn test_train_rejects_zero_days() {
    assert!(Cli::try_parse_from(["aqi", "train", "--days-back", "0"]).is_err());
}

#[test]
fn test_parse_forward_keeps_hyphen_args() {
    let cli = Cli::try_parse_from(["aqi", "forward", "--use-hopsworks", "--days-back", "30"])
        .unwrap();
    let Some(Command::Forward(args)) = cli.command else {
        panic!("expected forward command");
    };
    assert_eq!(args.args, vec!["--use-hopsworks", "--days-back", "30"]);
}

#[test]
fn test_parse_pipeline() {
    let cli = Cli::try_parse_from(["aqi", "pipeline", "fetch", "train", "--report", "r.json"])
        .unwrap();
    let Some(Command::Pipeline(args)) = cli.command else {
        panic!("expected pipeline command");
    };
    assert_eq!(args.steps, vec!["fetch", "train"]);
    assert_eq!(args.report, Some(PathBuf::from("r.json")));
}

#[test]
fn test_parse_artifacts_and_env() {
    let cli = Cli::try_parse_from(["aqi", "artifacts", "-p", "*.pkl"]).unwrap();
    assert!(
        matches!(cli.command, Some(Command::Artifacts(ref a)) if a.pattern.as_deref() == Some("*.pkl"))
    );

    let cli = Cli::try_parse_from(["aqi", "env", "--values"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Env(ref a)) if a.values));
}

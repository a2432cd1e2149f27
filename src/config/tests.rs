// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::error::{ConfigError, RunnerError};
use crate::core::env::container::Env;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

fn default_resolved() -> Config {
    let mut config = Config::default();
    config.resolve_and_validate().unwrap();
    config
}

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_json_snapshot!(
        serde_json::json!({
            "global.dry": config.global.dry,
            "global.output_log_level": config.global.output_log_level.as_u8(),
            "python.interpreter": config.python.interpreter,
            "training.days_back": config.training.days_back,
            "training.target": config.training.target,
            "training.data": config.training.data,
            "pipeline.steps": config.pipeline.steps,
        }),
        @r#"
    {
      "global.dry": false,
      "global.output_log_level": 3,
      "pipeline.steps": [
        "verify",
        "fetch",
        "train",
        "models",
        "artifacts"
      ],
      "python.interpreter": "python",
      "training.data": "data/ml_training_data_1year.csv",
      "training.days_back": 30,
      "training.target": "pollutant_aqi"
    }
    "#
    );
}

#[test]
fn test_parse_toml_sections() {
    let config = Config::parse(
        r#"
[global]
dry = true
output_log_level = 4

[python]
interpreter = "python3.11"

[training]
use_feature_store = true
days_back = 90
target = "pm25"

[scripts]
verify = "tools/check.py"

[aliases]
refresh = ["fetch", "train"]
"#,
    )
    .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.python.interpreter, "python3.11");
    assert!(config.training.use_feature_store);
    assert_eq!(config.training.days_back, 90);
    assert_eq!(config.training.target, "pm25");
    assert_eq!(config.scripts.verify, PathBuf::from("tools/check.py"));
    assert_eq!(config.scripts.fetch, PathBuf::from("src/main.py"));
    assert_eq!(config.aliases["refresh"], vec!["fetch", "train"]);
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("[training]\nepochs = 10\n");
    assert!(result.is_err());
}

#[test]
fn test_validation_rejects_zero_days_back() {
    let err = Config::parse("[training]\ndays_back = 0\n").unwrap_err();
    assert!(err.to_string().contains("days_back"), "{err}");
}

#[test]
fn test_validation_rejects_empty_target() {
    assert!(Config::parse("[training]\ntarget = \"  \"\n").is_err());
}

#[test]
fn test_paths_resolve_against_root() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().to_string_lossy().replace('\\', "/");
    let config = Config::parse(&format!("[paths]\nroot = \"{root}\"\nmodels = \"out/models\"\n")).unwrap();

    assert_eq!(config.paths.root, temp.path());
    assert_eq!(config.paths.models, temp.path().join("out").join("models"));
    assert_eq!(
        config.paths.resolve_path(Path::new("run_training.py")),
        temp.path().join("run_training.py")
    );
}

#[test]
fn test_relative_root_becomes_absolute() {
    let config = default_resolved();
    assert!(config.paths.root.is_absolute());
    assert!(config.paths.models.ends_with("modeling/models"));
}

#[test]
fn test_env_source_overrides_file() {
    let env: Env = [
        ("AQI_TRAINING__DAYS_BACK", "60"),
        ("AQI_PYTHON__INTERPRETER", "python3"),
        ("AQI_ENV_FILE", "other.env"),
        ("UNRELATED", "x"),
    ]
    .into_iter()
    .collect();

    let config = ConfigLoader::new()
        .add_toml_str("[training]\ndays_back = 14\ntarget = \"pm10\"\n")
        .with_env_source("AQI", &env)
        .build()
        .unwrap();

    assert_eq!(config.training.days_back, 60);
    assert_eq!(config.training.target, "pm10");
    assert_eq!(config.python.interpreter, "python3");
}

#[test]
fn test_set_overrides_env_source() {
    let env: Env = [("AQI_TRAINING__DAYS_BACK", "60")].into_iter().collect();

    let config = ConfigLoader::new()
        .with_env_source("AQI", &env)
        .set("training.days_back", "7")
        .set_from_str("training.use_feature_store=true")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.training.days_back, 7);
    assert!(config.training.use_feature_store);
}

#[test]
fn test_set_from_str_rejects_missing_equals() {
    assert!(ConfigLoader::new().set_from_str("training.days_back").is_err());
    assert!(ConfigLoader::new().set_from_str("=5").is_err());
}

#[test]
fn test_missing_required_file() {
    let temp = tempfile::tempdir().unwrap();
    let err = Config::from_file(temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RunnerError>(),
        Some(RunnerError::Config(inner)) if matches!(inner.as_ref(), ConfigError::NotFound(_))
    ));
}

#[test]
fn test_bad_toml_is_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[training\n").unwrap();

    let err = ConfigLoader::new().add_toml_file(&path).build().unwrap_err();
    match err.downcast_ref::<RunnerError>() {
        Some(RunnerError::Config(inner)) => match inner.as_ref() {
            ConfigError::ParseError { sources, .. } => assert!(sources.contains("broken.toml")),
            other => panic!("unexpected config error: {other}"),
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_loaded_files_listing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("aqi.toml");
    std::fs::write(&path, "[global]\ndry = true\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(temp.path().join("absent.toml"))
        .add_toml_file(&path);

    assert_eq!(loader.loaded_files().len(), 1);
    assert_eq!(loader.loaded_files()[0].0, "file");
    assert!(loader.build().unwrap().global.dry);
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let mut config = Config::default();
    config.paths.root = PathBuf::from("/srv/aqi");
    config.paths.models = PathBuf::from("/srv/aqi/modeling/models");
    config
        .aliases
        .insert("refresh".into(), vec!["fetch".into(), "train".into()]);

    let options = config.format_options();
    let keys: Vec<_> = options
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    insta::assert_snapshot!(
        options
            .iter()
            .filter(|l| l.starts_with("training.") || l.starts_with("aliases."))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    aliases.refresh            = fetch, train
    training.data              = data/ml_training_data_1year.csv
    training.days_back         = 30
    training.script            = run_training.py
    training.target            = pollutant_aqi
    training.use_feature_store = false
    "
    );
}

#[test]
fn test_script_args_table() {
    let config = Config::parse(
        "[scripts.args]\nfetch = [\"--backfill\", \"7\"]\nmodels = [\"--latest\"]\n",
    )
    .unwrap();
    assert_eq!(config.scripts.args_for("fetch"), ["--backfill", "7"]);
    assert!(config.scripts.args_for("verify").is_empty());
    assert!(
        config
            .format_options()
            .iter()
            .any(|line| line.starts_with("scripts.args.models") && line.ends_with("= --latest"))
    );
}

#[test]
fn test_script_args_for_non_script_step_rejected() {
    let err = Config::parse("[scripts.args]\ntrain = [\"--fast\"]\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'train' in section '[scripts.args]': not a script step (expected verify, fetch or models)"
    );
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for environment file loading.

use aqi_runner::core::env::container::Env;
use aqi_runner::envfile::{EnvFile, EnvFileLoader};
use aqi_runner::error::{EnvFileError, RunnerError};
use tempfile::TempDir;

fn write_env(temp: &TempDir, content: &[u8]) -> std::path::PathBuf {
    let path = temp.path().join(".env");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn envfile_documented_example() {
    let file = EnvFile::parse("FOO=bar\n# comment\n\nBAZ=\"qux\"\n").unwrap();
    insta::assert_yaml_snapshot!(file.to_map(), @r"
    BAZ: qux
    FOO: bar
    ");
}

#[test]
fn envfile_later_assignment_wins() {
    let file = EnvFile::parse("A=1\nA=2\n").unwrap();
    assert_eq!(file.to_map().get("A").map(String::as_str), Some("2"));
    assert_eq!(file.keys(), vec!["A"]);
}

#[test]
fn envfile_values_are_not_shell_expanded() {
    let file = EnvFile::parse("CMD=$(rm -rf /); echo `id`\nREF=${HOME}\n").unwrap();
    let map = file.to_map();
    assert_eq!(map["CMD"], "$(rm -rf /); echo `id`");
    assert_eq!(map["REF"], "${HOME}");
}

#[test]
fn loader_applies_over_existing_env() {
    let temp = TempDir::new().unwrap();
    let path = write_env(&temp, b"CITY=Karachi\nNEW=1\n");

    let mut env = Env::new();
    env.set("CITY", "Lahore");
    env.set("KEEP", "yes");

    EnvFileLoader::new(&path).load_into(&mut env).unwrap();
    assert_eq!(env.get("CITY"), Some("Karachi"));
    assert_eq!(env.get("NEW"), Some("1"));
    assert_eq!(env.get("KEEP"), Some("yes"));
}

#[test]
fn loader_optional_missing_is_noop() {
    let temp = TempDir::new().unwrap();
    let mut env = Env::new();
    env.set("CITY", "Lahore");
    let before = env.clone();

    let file = EnvFileLoader::new(temp.path().join("nope.env"))
        .load_into(&mut env)
        .unwrap();

    assert!(file.is_empty());
    assert!(env.shares_data_with(&before));
}

#[test]
fn loader_required_missing_fails() {
    let temp = TempDir::new().unwrap();
    let err = EnvFileLoader::new(temp.path().join("nope.env"))
        .required(true)
        .load()
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RunnerError>(),
        Some(RunnerError::EnvFile(inner)) if matches!(inner.as_ref(), EnvFileError::Missing { .. })
    ));
}

#[test]
fn loader_strict_reports_line_number() {
    let temp = TempDir::new().unwrap();
    let path = write_env(&temp, b"A=1\n\nnot a line\nB=2\n");

    let err = EnvFileLoader::new(&path).strict(true).load().unwrap_err();
    match err.downcast_ref::<RunnerError>() {
        Some(RunnerError::EnvFile(inner)) => match inner.as_ref() {
            EnvFileError::Malformed { line, content, .. } => {
                assert_eq!(*line, 3);
                assert_eq!(content, "not a line");
            }
            other => panic!("unexpected env file error: {other:?}"),
        },
        other => panic!("expected env file error, got {other:?}"),
    }

    let lenient = EnvFileLoader::new(&path).load().unwrap();
    assert_eq!(lenient.rejected().len(), 1);
    assert_eq!(lenient.keys(), vec!["A", "B"]);
}

#[test]
fn loader_decodes_utf16_powershell_output() {
    let temp = TempDir::new().unwrap();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "CITY=Lahore\r\nAQI_TARGET=\"pm25\"\r\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let path = write_env(&temp, &bytes);

    let file = EnvFileLoader::new(&path).load().unwrap();
    let map = file.to_map();
    assert_eq!(map["CITY"], "Lahore");
    assert_eq!(map["AQI_TARGET"], "pm25");
}

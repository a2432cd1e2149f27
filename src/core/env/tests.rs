// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::current_env;
use crate::core::env::container::Env;
use std::collections::BTreeMap;

#[test]
fn test_env_basic_operations() {
    let mut env = Env::new();
    env.set("FOO", "bar");

    assert_eq!(env.get("FOO"), Some("bar"));
    assert_eq!(env.get("NOTEXIST"), None);
    assert!(env.contains("FOO"));

    env.set("FOO", "baz");
    assert_eq!(env.get("FOO"), Some("baz"));
    assert_eq!(env.len(), 1);

    env.remove("FOO");
    assert!(env.is_empty());
}

#[test]
#[cfg(windows)]
fn test_env_keys_case_insensitive_on_windows() {
    let mut env = Env::new();
    env.set("Path", "C:\\bin");
    assert_eq!(env.get("PATH"), Some("C:\\bin"));
}

#[test]
#[cfg(unix)]
fn test_env_keys_case_sensitive_on_unix() {
    let mut env = Env::new();
    env.set("path", "lower");
    env.set("PATH", "upper");
    assert_eq!(env.get("path"), Some("lower"));
    assert_eq!(env.len(), 2);
}

#[test]
fn test_env_copy_on_write() {
    let mut env1 = Env::new();
    env1.set("KEY1", "value1");

    let mut env2 = env1.clone();
    assert!(env1.shares_data_with(&env2));

    env2.set("KEY2", "value2");
    assert!(!env1.shares_data_with(&env2));

    insta::assert_json_snapshot!(
        serde_json::json!({
            "env1": env1.to_map(),
            "env2": env2.to_map(),
        }),
        @r#"
    {
      "env1": {
        "KEY1": "value1"
      },
      "env2": {
        "KEY1": "value1",
        "KEY2": "value2"
      }
    }
    "#
    );
}

#[test]
fn test_env_remove_missing_keeps_sharing() {
    let env1: Env = [("A", "1")].into_iter().collect();
    let mut env2 = env1.clone();
    env2.remove("B");
    assert!(env1.shares_data_with(&env2));
}

#[test]
fn test_current_env() {
    let env = current_env();
    assert!(
        env.get("PATH").is_some() || env.get("Path").is_some(),
        "PATH should exist in current environment"
    );
}

#[test]
fn test_env_from_map_and_extend() {
    let mut map = BTreeMap::new();
    map.insert("KEY1".to_string(), "value1".to_string());

    let mut env = Env::from_map(map);
    env.extend([("KEY1", "override"), ("KEY2", "value2")]);

    assert_eq!(env.get("KEY1"), Some("override"));
    assert_eq!(env.get("KEY2"), Some("value2"));
    assert_eq!(env.len(), 2);
}

#[test]
fn test_env_with_prefix() {
    let env: Env = [
        ("AQI_TRAINING__DAYS_BACK", "60"),
        ("AQI_PYTHON__INTERPRETER", "python3"),
        ("HOPSWORKS_API_KEY", "secret"),
    ]
    .into_iter()
    .collect();

    let keys: Vec<_> = env.with_prefix("AQI_").into_keys().collect();
    insta::assert_snapshot!(keys.join(","), @"AQI_PYTHON__INTERPRETER,AQI_TRAINING__DAYS_BACK");
}

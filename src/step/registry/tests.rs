// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::StepRegistry;
use crate::config::types::Aliases;
use crate::step::steps::BUILTIN_STEPS;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn create_test_registry() -> StepRegistry {
    let mut aliases: Aliases = BTreeMap::new();
    aliases.insert("refresh".to_string(), strings(&["fetch", "train"]));
    aliases.insert("report".to_string(), strings(&["models", "artifacts"]));
    aliases.insert("nightly".to_string(), strings(&["verify", "refresh", "report"]));
    aliases.insert("loop".to_string(), strings(&["loop", "train"]));

    let mut registry = StepRegistry::new(aliases);
    registry.register_all(BUILTIN_STEPS);
    registry
}

#[test]
fn test_register_keeps_order_and_dedupes() {
    let mut registry = StepRegistry::new(BTreeMap::new());
    registry.register_all(["train", "fetch", "train"]);
    assert_eq!(registry.all_steps(), strings(&["train", "fetch"]));
}

#[test]
fn test_resolve_aliases_nested() {
    let registry = create_test_registry();
    let result = registry.resolve_aliases(&strings(&["nightly"]));
    insta::assert_yaml_snapshot!(result, @r"
    - verify
    - fetch
    - train
    - models
    - artifacts
    ");
}

#[test]
fn test_resolve_aliases_non_alias() {
    let registry = create_test_registry();
    let result = registry.resolve_aliases(&strings(&["train"]));
    assert_eq!(result, strings(&["train"]));
}

#[test]
fn test_recursive_alias_terminates() {
    let registry = create_test_registry();
    let result = registry.resolve_aliases(&strings(&["loop"]));
    assert_eq!(result, strings(&["train"]));
}

#[test]
fn test_match_pattern() {
    let registry = create_test_registry();
    assert_eq!(registry.match_pattern("train").unwrap(), strings(&["train"]));
    assert_eq!(
        registry.match_pattern("*").unwrap().len(),
        BUILTIN_STEPS.len()
    );
    assert_eq!(registry.match_pattern("m*").unwrap(), strings(&["models"]));
    assert!(registry.match_pattern("deploy").unwrap().is_empty());
}

#[test]
fn test_match_pattern_invalid_glob() {
    let registry = create_test_registry();
    assert!(registry.match_pattern("[").is_err());
}

#[test]
fn test_resolve_uses_pipeline_order() {
    let registry = create_test_registry();
    let result = registry
        .resolve(&strings(&["artifacts", "train", "fetch"]))
        .unwrap();
    insta::assert_yaml_snapshot!(result, @r"
    - fetch
    - train
    - artifacts
    ");
}

#[test]
fn test_resolve_dedupes_alias_and_glob() {
    let registry = create_test_registry();
    let result = registry
        .resolve(&strings(&["refresh", "*rain", "report"]))
        .unwrap();
    assert_eq!(result, strings(&["fetch", "train", "models", "artifacts"]));
}

#[test]
fn test_resolve_unknown_is_empty() {
    let registry = create_test_registry();
    assert!(registry.resolve(&strings(&["deploy"])).unwrap().is_empty());
}

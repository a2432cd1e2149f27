// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::steps::artifacts::ArtifactsStep;
use super::steps::script::ScriptStep;
use super::steps::train::TrainStep;
use super::tools::training::TrainingInvocation;
use super::{Runnable, Step, StepContext};
use crate::config::Config;
use crate::core::env::container::Env;

fn context() -> StepContext {
    let mut env = Env::new();
    env.set("CITY", "Lahore");
    StepContext::new(Arc::new(Config::default()), env, CancellationToken::new())
}

#[test]
fn test_context_accessors() {
    let ctx = context();
    assert!(!ctx.is_dry_run());
    assert!(!ctx.is_cancelled());
    assert_eq!(ctx.env().get("CITY"), Some("Lahore"));

    let ctx = ctx.with_dry_run(true);
    assert!(ctx.is_dry_run());

    ctx.cancel_token().cancel();
    assert!(ctx.is_cancelled());
}

#[test]
fn test_step_enum_dispatch() {
    let ctx = context();
    let steps = [
        Step::Script(ScriptStep::new("verify", "scripts/verify_hopsworks.py")),
        Step::Script(ScriptStep::new("fetch", "")),
        Step::Train(TrainStep::new(
            TrainingInvocation::feature_store_defaults().into(),
        )),
        Step::Artifacts(ArtifactsStep::new("**/*.pkl")),
    ];

    let summary: Vec<String> = steps
        .iter()
        .map(|s| format!("{}:{}", s.name(), s.enabled(&ctx)))
        .collect();
    insta::assert_snapshot!(
        summary.join(" "),
        @"verify:true fetch:false train:true artifacts:true"
    );
}

#[test]
fn test_script_step_args_reach_tool() {
    let step = ScriptStep::new("verify", "scripts/verify_hopsworks.py").with_args(["--quiet"]);
    let tool = step.tool();
    assert_eq!(tool.arguments(), ["--quiet".to_string()]);
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;

use super::{StepRunner, StepState};
use crate::config::Config;
use crate::core::env::container::Env;
use crate::error::{ProcessError, Result, RunnerError, StepError};
use crate::step::test_utils::capture_logs;
use crate::step::{Runnable, StepContext};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    ExitCode,
    Disabled,
    CancelPipeline,
}

struct FakeStep {
    name: &'static str,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl FakeStep {
    fn new(name: &'static str, behavior: Behavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name,
                behavior,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl Runnable for FakeStep {
    fn name(&self) -> &str {
        self.name
    }

    fn enabled(&self, _ctx: &StepContext) -> bool {
        !matches!(self.behavior, Behavior::Disabled)
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Fail => anyhow::bail!("connection refused"),
                Behavior::ExitCode => Err(RunnerError::from(ProcessError::NonZeroExit {
                    command: self.name.to_string(),
                    code: 1,
                    stderr: "Traceback (most recent call last):\nConnectionError: connection refused\n"
                        .to_string(),
                })
                .into()),
                Behavior::CancelPipeline => {
                    ctx.cancel_token().cancel();
                    Ok(())
                }
                Behavior::Succeed | Behavior::Disabled => Ok(()),
            }
        })
    }
}

fn runner() -> StepRunner {
    StepRunner::new(Arc::new(Config::default()), Env::new())
}

fn states(report: &super::RunReport) -> Vec<StepState> {
    report.steps().iter().map(super::StepReport::state).collect()
}

#[tokio::test]
async fn test_halts_on_first_failure() {
    let (a, a_calls) = FakeStep::new("a", Behavior::Succeed);
    let (b, b_calls) = FakeStep::new("b", Behavior::Fail);
    let (c, c_calls) = FakeStep::new("c", Behavior::Succeed);

    let mut runner = runner();
    runner.add(a);
    runner.add(b);
    runner.add(c);

    let report = runner.run().await;

    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        states(&report),
        vec![StepState::Ok, StepState::Failed, StepState::Pending]
    );
    assert!(!report.is_success());

    let failed = report.failed_step().unwrap();
    assert_eq!(failed.name(), "b");
    assert_eq!(failed.message(), Some("connection refused"));
}

#[tokio::test]
async fn test_run_all_returns_step_failed() {
    let (a, _) = FakeStep::new("fetch", Behavior::Fail);
    let mut runner = runner();
    runner.add(a);

    let err = runner.run_all().await.unwrap_err();
    match err.downcast_ref::<RunnerError>() {
        Some(RunnerError::Step(inner)) => match inner.as_ref() {
            StepError::Failed { step, message } => {
                assert_eq!(step, "fetch");
                assert_eq!(message, "connection refused");
            }
            other => panic!("unexpected step error: {other:?}"),
        },
        other => panic!("expected step error, got {other:?}"),
    }
    insta::assert_snapshot!(
        err.to_string(),
        @"step error: step 'fetch' failed: connection refused"
    );
}

#[tokio::test]
async fn test_all_ok() {
    let (a, _) = FakeStep::new("a", Behavior::Succeed);
    let (b, _) = FakeStep::new("b", Behavior::Succeed);
    let mut runner = runner();
    runner.add(a);
    runner.add(b);

    assert_eq!(runner.step_count(), 2);
    runner.run_all().await.unwrap();
}

#[tokio::test]
async fn test_failed_process_renders_chain_once() {
    let (a, _) = FakeStep::new("fetch", Behavior::ExitCode);
    let mut runner = runner();
    runner.add(a);

    let report = runner.run().await;
    insta::assert_snapshot!(
        report.steps()[0].message().unwrap_or_default(),
        @"process error: process 'fetch' exited with code 1: ConnectionError: connection refused"
    );

    let err = report.into_result().unwrap_err();
    insta::assert_snapshot!(
        format!("{err:#}"),
        @"step error: step 'fetch' failed: process error: process 'fetch' exited with code 1: ConnectionError: connection refused"
    );
}

#[tokio::test]
async fn test_empty_runner_succeeds() {
    let report = runner().run().await;
    assert!(report.steps().is_empty());
    assert!(report.is_success());
}

#[tokio::test]
async fn test_disabled_step_is_skipped() {
    let (a, a_calls) = FakeStep::new("verify", Behavior::Disabled);
    let (b, b_calls) = FakeStep::new("train", Behavior::Succeed);
    let mut runner = runner();
    runner.add(a);
    runner.add(b);

    let report = runner.run().await;
    assert_eq!(a_calls.load(Ordering::SeqCst), 0);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(states(&report), vec![StepState::Skipped, StepState::Ok]);
    assert!(report.is_success());
}

#[tokio::test]
async fn test_cancellation_stops_remaining_steps() {
    let (a, _) = FakeStep::new("fetch", Behavior::CancelPipeline);
    let (b, b_calls) = FakeStep::new("train", Behavior::Succeed);
    let (c, _) = FakeStep::new("models", Behavior::Succeed);
    let mut runner = runner();
    runner.add(a);
    runner.add(b);
    runner.add(c);

    let report = runner.run().await;
    assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        states(&report),
        vec![StepState::Ok, StepState::Failed, StepState::Pending]
    );
    assert_eq!(
        report.failed_step().and_then(super::StepReport::message),
        Some("step 'train' was interrupted")
    );
}

#[tokio::test]
async fn test_interrupt_before_run() {
    let (a, a_calls) = FakeStep::new("verify", Behavior::Succeed);
    let mut runner = runner();
    runner.add(a);
    runner.interrupt_all();

    assert!(runner.is_cancelled());
    let report = runner.run().await;
    assert_eq!(a_calls.load(Ordering::SeqCst), 0);
    assert_eq!(states(&report), vec![StepState::Failed]);
}

#[tokio::test]
async fn test_logs_ok_and_fail_markers() {
    let (a, _) = FakeStep::new("verify", Behavior::Succeed);
    let (b, _) = FakeStep::new("fetch", Behavior::Fail);
    let mut runner = runner();
    runner.add(a);
    runner.add(b);

    let (report, logs) = capture_logs(|| runner.run()).await;

    assert!(!report.is_success());
    let markers: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains(" OK") || line.contains(" FAIL"))
        .collect();
    assert_eq!(markers.len(), 2, "{logs}");
    assert!(markers[0].starts_with(" INFO") && markers[0].contains("step=verify"));
    assert!(markers[1].starts_with("ERROR") && markers[1].contains("step=fetch"));
    assert!(markers[1].contains("error=connection refused"), "{logs}");
}

#[tokio::test]
async fn test_report_json() {
    let (a, _) = FakeStep::new("verify", Behavior::Disabled);
    let (b, _) = FakeStep::new("fetch", Behavior::Succeed);
    let (c, _) = FakeStep::new("train", Behavior::Fail);
    let (d, _) = FakeStep::new("models", Behavior::Succeed);
    let mut runner = runner();
    runner.add(a);
    runner.add(b);
    runner.add(c);
    runner.add(d);

    let report = runner.run().await;
    insta::assert_json_snapshot!(report, {
        ".steps[].elapsed_ms" => "[elapsed]"
    }, @r#"
    {
      "steps": [
        {
          "name": "verify",
          "state": "skipped",
          "elapsed_ms": "[elapsed]"
        },
        {
          "name": "fetch",
          "state": "ok",
          "elapsed_ms": "[elapsed]"
        },
        {
          "name": "train",
          "state": "failed",
          "message": "connection refused",
          "elapsed_ms": "[elapsed]"
        },
        {
          "name": "models",
          "state": "pending",
          "elapsed_ms": "[elapsed]"
        }
      ]
    }
    "#);
}

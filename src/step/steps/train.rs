// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Training step.

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::Result;
use crate::step::tools::Tool;
use crate::step::tools::python::PythonTool;
use crate::step::tools::training::TrainingArgs;
use crate::step::{Runnable, StepContext};

/// Runs `training.script` with assembled arguments.
#[derive(Debug, Clone)]
pub struct TrainStep {
    args: TrainingArgs,
}

impl TrainStep {
    #[must_use]
    pub const fn new(args: TrainingArgs) -> Self {
        Self { args }
    }

    #[must_use]
    pub const fn args(&self) -> &TrainingArgs {
        &self.args
    }

    #[must_use]
    pub fn tool(&self, ctx: &StepContext) -> PythonTool {
        PythonTool::new(&ctx.config().training.script)
            .args(self.args.to_args())
            .label("train")
    }
}

impl Runnable for TrainStep {
    fn name(&self) -> &'static str {
        "train"
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            debug!(args = ?self.args, "training arguments");
            self.tool(ctx).run(ctx).await
        })
    }
}

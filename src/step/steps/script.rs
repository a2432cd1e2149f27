// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Helper script step.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::step::tools::Tool;
use crate::step::tools::python::PythonTool;
use crate::step::{Runnable, StepContext};

/// Runs one project script with no arguments.
///
/// An empty script path disables the step.
#[derive(Debug, Clone)]
pub struct ScriptStep {
    name: String,
    script: PathBuf,
    args: Vec<String>,
}

impl ScriptStep {
    #[must_use]
    pub fn new(name: impl Into<String>, script: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            script: script.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    #[must_use]
    pub fn tool(&self) -> PythonTool {
        PythonTool::new(&self.script)
            .args(self.args.iter().cloned())
            .label(self.name.clone())
    }
}

impl Runnable for ScriptStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, _ctx: &StepContext) -> bool {
        !self.script.as_os_str().is_empty()
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.tool().run(ctx).await })
    }
}

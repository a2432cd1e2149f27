// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool abstractions for step execution.
//!
//! ```text
//! Step --> StepContext --> Tool --> ProcessBuilder
//! StepContext: cancel token --> run_with_cancellation
//! ```

use futures_util::future::BoxFuture;

use super::StepContext;
use crate::error::Result;

pub mod python;
pub mod training;

/// Trait for tools that execute external processes.
///
/// - Tools should use `ProcessBuilder::run_with_cancellation()`
/// - Tools should respect `ctx.is_dry_run()` and only log the command
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "python").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>>;
}

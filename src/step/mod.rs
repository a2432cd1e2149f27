// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Step execution system.
//!
//! # Architecture
//!
//! ```text
//! StepRunner
//!      |
//!      v
//!  Box<dyn Runnable> ----> StepContext (config, env, cancel token, dry run)
//!      |
//!      v
//!  Step enum
//!   /    |     \
//!  v     v      v
//! Script Train  Artifacts
//!   \    /         |
//!    v  v          v
//!   PythonTool   parallel_walk
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`StepRunner`](runner::StepRunner) | Runs steps in order, halting on the first failure |
//! | [`Step`] | Enum dispatching to the built-in steps |
//! | [`Runnable`] | Trait defining the common step interface |
//! | [`StepContext`] | Execution context shared by every step |
//! | [`StepRegistry`](registry::StepRegistry) | Resolves names, aliases and globs to steps |
//!
//! The [`Step`] enum implements `Runnable` via the `impl_runnable_for_step!`
//! macro, which delegates each method to the inner type.

pub mod registry;
pub mod runner;
pub mod steps;
pub mod tools;

use futures_util::future::BoxFuture;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::env::container::Env;
use crate::error::Result;

use steps::artifacts::ArtifactsStep;
use steps::script::ScriptStep;
use steps::train::TrainStep;

/// A unit of work run by [`StepRunner`](runner::StepRunner).
///
/// # Example
///
/// ```
/// use aqi_runner::error::Result;
/// use aqi_runner::step::{Runnable, StepContext};
/// use futures_util::future::BoxFuture;
///
/// struct Hello;
///
/// impl Runnable for Hello {
///     fn name(&self) -> &str { "hello" }
///     fn run<'a>(&'a self, _ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
///         Box::pin(async { Ok(()) })
///     }
/// }
/// ```
pub trait Runnable: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the step should run. Disabled steps are reported as skipped.
    fn enabled(&self, _ctx: &StepContext) -> bool {
        true
    }

    fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>>;
}

/// Context provided to steps during execution.
#[derive(Clone)]
pub struct StepContext {
    config: Arc<Config>,
    /// Environment for every child process.
    env: Env,
    cancel_token: CancellationToken,
    dry_run: bool,
}

impl StepContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, env: Env, cancel_token: CancellationToken) -> Self {
        Self {
            config,
            env,
            cancel_token,
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A built-in pipeline step.
#[derive(Debug, Clone)]
pub enum Step {
    /// Runs a helper script (verify, fetch, models).
    Script(ScriptStep),
    /// Runs the training program.
    Train(TrainStep),
    /// Lists model artifacts.
    Artifacts(ArtifactsStep),
}

macro_rules! impl_runnable_for_step {
    ($($variant:ident),+ $(,)?) => {
        impl Runnable for Step {
            fn name(&self) -> &str {
                match self {
                    $(Step::$variant(s) => Runnable::name(s),)+
                }
            }

            fn enabled(&self, ctx: &StepContext) -> bool {
                match self {
                    $(Step::$variant(s) => Runnable::enabled(s, ctx),)+
                }
            }

            fn run<'a>(&'a self, ctx: &'a StepContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Step::$variant(s) => Runnable::run(s, ctx),)+
                }
            }
        }
    };
}

impl_runnable_for_step!(Script, Train, Artifacts);

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;

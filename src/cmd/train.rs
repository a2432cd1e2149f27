// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Train and forward command implementations.

use tracing::info;

use super::{Session, run_interruptible};
use crate::cli::train::{ForwardArgs, TrainArgs};
use crate::error::Result;
use crate::step::runner::StepRunner;
use crate::step::steps::train::TrainStep;
use crate::step::tools::training::TrainingArgs;

async fn run_training(session: &Session, args: TrainingArgs, dry_run: bool) -> Result<()> {
    info!(args = ?args.to_args(), "training");

    let mut runner = StepRunner::new(session.config.clone(), session.env.clone())
        .with_dry_run(dry_run);
    runner.add(TrainStep::new(args));

    run_interruptible(&runner).await.into_result()
}

/// Main handler for train command.
///
/// # Errors
///
/// Returns an error if the training program cannot be started or fails.
pub async fn run_train_command(args: &TrainArgs, session: &Session, dry_run: bool) -> Result<()> {
    let training = args.to_training_args(&session.config.training);
    run_training(session, training, dry_run).await
}

/// Main handler for forward command.
///
/// # Errors
///
/// Returns an error if the training program cannot be started or fails.
pub async fn run_forward_command(
    args: &ForwardArgs,
    session: &Session,
    dry_run: bool,
) -> Result<()> {
    let training = args.to_training_args(&session.config.training);
    run_training(session, training, dry_run).await
}

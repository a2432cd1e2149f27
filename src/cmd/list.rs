// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation.

use crate::cli::pipeline::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::step::registry::StepRegistry;
use crate::step::steps::BUILTIN_STEPS;

/// Registry with every built-in step and the configured aliases.
#[must_use]
pub fn step_registry(config: &Config) -> StepRegistry {
    let mut registry = StepRegistry::new(config.aliases.clone());
    registry.register_all(BUILTIN_STEPS);
    registry
}

/// Describes what a step runs, for `list`.
#[must_use]
pub fn describe_step(name: &str, config: &Config) -> String {
    let script = |path: &std::path::Path| {
        if path.as_os_str().is_empty() {
            "(disabled)".to_string()
        } else {
            path.display().to_string()
        }
    };

    match name {
        "verify" => script(&config.scripts.verify),
        "fetch" => script(&config.scripts.fetch),
        "models" => script(&config.scripts.models),
        "train" => script(&config.training.script),
        "artifacts" => format!(
            "{} ({})",
            config.paths.models.display(),
            config.pipeline.artifact_pattern
        ),
        _ => String::new(),
    }
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if step resolution fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    if args.aliases {
        if config.aliases.is_empty() {
            println!("No aliases defined");
        } else {
            for (name, targets) in &config.aliases {
                println!("{} = {}", name, targets.join(", "));
            }
        }
        return Ok(());
    }

    let registry = step_registry(config);
    let steps = if args.steps.is_empty() {
        registry.all_steps().to_vec()
    } else {
        registry.resolve(&args.steps)?
    };

    if steps.is_empty() {
        println!("No steps found");
    } else {
        let width = steps.iter().map(String::len).max().unwrap_or(0);
        for step in &steps {
            println!("{step:<width$}  {}", describe_step(step, config));
        }
    }
    Ok(())
}

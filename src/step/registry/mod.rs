// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Step registry for resolving step names and aliases.
//!
//! ```text
//! input ["refresh", "mod*"]
//!   resolve_aliases: "refresh" --> [fetch, train]
//!   match_pattern:   "mod*"    --> [models]
//!   dedupe, then sort into registration order
//!   --> [fetch, train, models]
//! ```

use std::collections::BTreeSet;

use anyhow::Context;
use tracing::warn;
use wax::{Glob, Program};

use crate::config::types::Aliases;
use crate::error::Result;

/// Registry for looking up steps by name or pattern.
pub struct StepRegistry {
    /// Registered step names in pipeline order.
    step_names: Vec<String>,
    aliases: Aliases,
}

impl StepRegistry {
    #[must_use]
    pub const fn new(aliases: Aliases) -> Self {
        Self {
            step_names: Vec::new(),
            aliases,
        }
    }

    /// Registers a step name. Registration order is pipeline order.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.step_names.contains(&name) {
            self.step_names.push(name);
        }
    }

    pub fn register_all(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        for name in names {
            self.register(name);
        }
    }

    #[must_use]
    pub fn all_steps(&self) -> &[String] {
        &self.step_names
    }

    #[must_use]
    pub const fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Expands aliases, recursively. Non-alias patterns are kept as-is.
    ///
    /// An alias that refers back to itself is not expanded a second time.
    #[must_use]
    pub fn resolve_aliases(&self, patterns: &[String]) -> Vec<String> {
        let mut result = Vec::new();
        let mut active = Vec::new();
        self.expand_into(patterns, &mut active, &mut result);
        result
    }

    fn expand_into<'a>(
        &'a self,
        patterns: &'a [String],
        active: &mut Vec<&'a str>,
        result: &mut Vec<String>,
    ) {
        for pattern in patterns {
            match self.aliases.get(pattern) {
                Some(_) if active.contains(&pattern.as_str()) => {
                    warn!(alias = %pattern, "recursive alias ignored");
                }
                Some(targets) => {
                    active.push(pattern);
                    self.expand_into(targets, active, result);
                    active.pop();
                }
                None => result.push(pattern.clone()),
            }
        }
    }

    /// Matches a glob pattern against registered step names.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        if self.step_names.iter().any(|name| name == pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob =
            Glob::new(pattern).with_context(|| format!("invalid step pattern: {pattern}"))?;

        Ok(self
            .step_names
            .iter()
            .filter(|name| glob.is_match(name.as_str()))
            .cloned()
            .collect())
    }

    /// Resolves step specifications to concrete step names.
    ///
    /// Aliases are expanded, globs matched, duplicates dropped, and the
    /// result is returned in registration order regardless of input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is an invalid glob.
    pub fn resolve(&self, specs: &[String]) -> Result<Vec<String>> {
        let expanded = self.resolve_aliases(specs);
        let mut selected = BTreeSet::new();

        for pattern in &expanded {
            let matches = self.match_pattern(pattern)?;
            if matches.is_empty() {
                warn!(pattern = %pattern, "pattern matched no steps");
            }
            selected.extend(matches);
        }

        Ok(self
            .step_names
            .iter()
            .filter(|name| selected.contains(*name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests;

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Explicit environment passed to child processes.
//!
//! # Architecture
//!
//! ```text
//! current_env() --> Env (snapshot) --(EnvFile::apply_to)--> Env
//!                                                           |
//!                      ProcessBuilder::env(), ConfigLoader::with_env_source()
//! ```
//!
//! The process environment is read once and never written back.
//! Clones share data until modified.

pub mod container;
mod types;

#[cfg(test)]
mod tests;

/// Captures the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn current_env() -> container::Env {
    let vars = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    container::Env::from_map(vars)
}

// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key and storage types for [`Env`](super::container::Env).
//!
//! ```text
//! EnvKey:  exact match on Unix, case-insensitive on Windows (PATH == Path)
//! EnvData: BTreeMap<EnvKey, String> for deterministic order
//! ```

use std::collections::BTreeMap;

/// An environment variable name, compared the way the host OS compares them.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    fn cmp_key(&self, other: &Self) -> std::cmp::Ordering {
        if cfg!(windows) {
            let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
            let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
            lhs.cmp(rhs)
        } else {
            self.0.cmp(&other.0)
        }
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other).is_eq()
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp_key(other)
    }
}

/// Shared environment data for copy-on-write semantics.
#[derive(Debug, Clone, Default)]
pub(super) struct EnvData {
    vars: BTreeMap<EnvKey, String>,
}

impl EnvData {
    pub(super) const fn from_vars(vars: BTreeMap<EnvKey, String>) -> Self {
        Self { vars }
    }

    pub(super) const fn vars(&self) -> &BTreeMap<EnvKey, String> {
        &self.vars
    }

    pub(super) const fn vars_mut(&mut self) -> &mut BTreeMap<EnvKey, String> {
        &mut self.vars
    }
}

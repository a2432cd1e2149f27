// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copy-on-write environment variable set.

use super::types::{EnvData, EnvKey};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Cloning is cheap: copies share one `Arc` until either side is modified.
///
/// # Thread Safety
/// `Env` is `Send` and `Sync` due to its use of `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Env {
    data: Arc<EnvData>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        let vars = vars.into_iter().map(|(k, v)| (EnvKey::new(k), v)).collect();
        Self {
            data: Arc::new(EnvData::from_vars(vars)),
        }
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.data)
            .vars_mut()
            .insert(EnvKey::new(key), value.into());
        self
    }

    /// Sets every pair from `vars`, later pairs overwriting earlier ones.
    pub fn extend<K, V, I>(&mut self, vars: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut vars = vars.into_iter().peekable();
        if vars.peek().is_none() {
            return self;
        }
        let data = Arc::make_mut(&mut self.data);
        for (key, value) in vars {
            data.vars_mut().insert(EnvKey::new(key), value.into());
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.vars().get(&EnvKey::new(key)).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.vars().contains_key(&EnvKey::new(key))
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.contains(key) {
            Arc::make_mut(&mut self.data)
                .vars_mut()
                .remove(&EnvKey::new(key));
        }
        self
    }

    /// Returns all variables whose name starts with `prefix`.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> BTreeMap<String, String> {
        self.iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Returns all environment variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Returns an iterator over environment variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.vars().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.vars().len()
    }

    /// Returns true if both values share storage (no write since the clone).
    #[must_use]
    pub fn shares_data_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

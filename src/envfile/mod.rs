// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `KEY=VALUE` environment file loading.
//!
//! # Architecture
//!
//! ```text
//! .env bytes --decode_text()--> text --LineParser--> EnvFile
//!                                                      |
//!                                    assignments   rejected lines
//!                                          |
//!                              to_map() / apply_to(&mut Env)
//! ```
//!
//! # Format
//!
//! ```text
//! # comment                 skipped
//!                           skipped (blank)
//! KEY=value                 KEY -> "value"
//!   KEY = "quoted value"    KEY -> "quoted value"
//! not a line                rejected (error in strict mode)
//! ```
//!
//! A repeated key keeps its last value.

pub mod loader;
mod parser;


use crate::core::env::container::Env;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use loader::EnvFileLoader;
use parser::{LineParser, ParsedLine};

/// A single `KEY=VALUE` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    key: String,
    value: String,
    line: usize,
}

impl EnvAssignment {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value with surrounding whitespace and one pair of quotes removed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 1-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// A non-blank, non-comment line that is not an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    line: usize,
    content: String,
}

impl RejectedLine {
    /// 1-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Parsed environment file, in file order.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    path: Option<PathBuf>,
    assignments: Vec<EnvAssignment>,
    rejected: Vec<RejectedLine>,
}

impl EnvFile {
    /// Parses environment file text.
    ///
    /// Lines that are neither blank, comments nor assignments are kept in
    /// [`rejected`](Self::rejected) instead of failing the parse.
    ///
    /// # Errors
    ///
    /// Returns an error if the line pattern fails to compile.
    ///
    /// # Example
    /// ```
    /// use aqi_runner::envfile::EnvFile;
    ///
    /// let file = EnvFile::parse("FOO=bar\n# comment\n\nBAZ=\"qux\"\n")?;
    /// let map = file.to_map();
    /// assert_eq!(map["FOO"], "bar");
    /// assert_eq!(map["BAZ"], "qux");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let parser = LineParser::new()?;
        Ok(Self::parse_with(&parser, content))
    }

    fn parse_with(parser: &LineParser, content: &str) -> Self {
        let mut file = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            match parser.parse_line(raw) {
                ParsedLine::Skip => {}
                ParsedLine::Assignment { key, value } => file.assignments.push(EnvAssignment {
                    key: key.to_owned(),
                    value: unquote(value).to_owned(),
                    line,
                }),
                ParsedLine::Rejected => file.rejected.push(RejectedLine {
                    line,
                    content: raw.to_owned(),
                }),
            }
        }

        file
    }

    fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    /// Path the file was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn assignments(&self) -> &[EnvAssignment] {
        &self.assignments
    }

    #[must_use]
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the distinct keys in first-seen order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for assignment in &self.assignments {
            if !keys.contains(&assignment.key()) {
                keys.push(assignment.key());
            }
        }
        keys
    }

    /// Returns the key/value mapping; the last assignment of a key wins.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.assignments
            .iter()
            .map(|a| (a.key.clone(), a.value.clone()))
            .collect()
    }

    /// Writes every assignment into `env` in file order, overwriting
    /// existing values.
    pub fn apply_to(&self, env: &mut Env) {
        env.extend(
            self.assignments
                .iter()
                .map(|a| (a.key.as_str(), a.value.as_str())),
        );
    }
}

/// Strips one pair of surrounding double quotes.
///
/// Only a value of at least two characters that both starts and ends with
/// `"` is changed. Inner quotes are kept.
///
/// ```
/// use aqi_runner::envfile::unquote;
///
/// assert_eq!(unquote("\"qux\""), "qux");
/// assert_eq!(unquote("\"a\"b\""), "a\"b");
/// assert_eq!(unquote("\""), "\"");
/// assert_eq!(unquote("'single'"), "'single'");
/// ```
#[must_use]
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

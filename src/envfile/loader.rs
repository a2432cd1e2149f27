// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading environment files from disk.

use super::EnvFile;
use super::parser::LineParser;
use crate::core::env::container::Env;
use crate::error::{EnvFileError, Result, RunnerError};
use crate::utility::encoding::decode_text;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads a `KEY=VALUE` file with a configurable missing-file and
/// malformed-line policy.
///
/// Defaults: optional (a missing file loads as empty) and lenient
/// (malformed lines are logged and skipped).
///
/// # Example
/// ```no_run
/// use aqi_runner::core::env::current_env;
/// use aqi_runner::envfile::EnvFileLoader;
///
/// let mut env = current_env();
/// let file = EnvFileLoader::new(".env").required(true).load_into(&mut env)?;
/// println!("{} keys loaded", file.keys().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvFileLoader {
    path: PathBuf,
    required: bool,
    strict: bool,
}

impl EnvFileLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
            strict: false,
        }
    }

    /// Fail with [`EnvFileError::Missing`] when the file does not exist.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Fail with [`EnvFileError::Malformed`] on the first malformed line.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file.
    ///
    /// # Errors
    ///
    /// - [`EnvFileError::Missing`] if the file is required and absent
    /// - [`EnvFileError::Read`] on any other I/O failure
    /// - [`EnvFileError::Malformed`] in strict mode
    pub fn load(&self) -> Result<EnvFile> {
        let path_display = self.path.display().to_string();

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.required {
                    return Err(RunnerError::from(EnvFileError::Missing {
                        path: path_display,
                    })
                    .into());
                }
                debug!(path = %path_display, "env file not found, skipping");
                return Ok(EnvFile::default());
            }
            Err(source) => {
                return Err(RunnerError::from(EnvFileError::Read {
                    path: path_display,
                    source,
                })
                .into());
            }
        };

        let decoded = decode_text(&bytes);
        if decoded.had_errors() {
            warn!(
                path = %path_display,
                encoding = %decoded.encoding(),
                "env file contains invalid byte sequences"
            );
        }

        let parser = LineParser::new()?;
        let file = EnvFile::parse_with(&parser, decoded.text()).with_path(&self.path);

        if let Some(first) = file.rejected().first() {
            if self.strict {
                return Err(RunnerError::from(EnvFileError::Malformed {
                    path: path_display,
                    line: first.line(),
                    content: first.content().to_owned(),
                })
                .into());
            }
            for rejected in file.rejected() {
                debug!(
                    path = %path_display,
                    line = rejected.line(),
                    content = rejected.content(),
                    "skipping malformed env line"
                );
            }
        }

        info!(
            path = %path_display,
            keys = file.keys().len(),
            encoding = %decoded.encoding(),
            "loaded env file"
        );
        Ok(file)
    }

    /// Loads the file and applies it to `env`.
    ///
    /// `env` is only modified when loading succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_into(&self, env: &mut Env) -> Result<EnvFile> {
        let file = self.load()?;
        file.apply_to(env);
        Ok(file)
    }
}

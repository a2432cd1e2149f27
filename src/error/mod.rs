// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                RunnerError (~24 bytes)
//!                         |
//!     +--------+--------+-+------+--------+------+
//!     |        |        |        |        |      |
//!     v        v        v        v        v      v
//!   Bailed  EnvFile  Config    Step   Process   Io
//!  Box<str>   Box      Box      Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   EnvFile  Missing, Read, Malformed
//!   Config   ParseError, InvalidValue, NotFound
//!   Step     NotFound, Failed, Interrupted
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RunnerError`].
pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
/// The wrapped error is rendered inline rather than exposed as a source, so
/// `{:#}` prints each message once.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Environment file error.
    #[error("env file error: {0}")]
    EnvFile(Box<EnvFileError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Step execution error.
    #[error("step error: {0}")]
    Step(Box<StepError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`RunnerError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> RunnerError {
    RunnerError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RunnerError {
                fn from(err: $error) -> Self {
                    RunnerError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvFileError => EnvFile,
    ConfigError => Config,
    StepError => Step,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Env File Errors ---

/// Errors raised while loading a `KEY=VALUE` environment file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    /// The file is required but does not exist.
    #[error("config file not found: {path}")]
    Missing { path: String },

    /// The file exists but could not be read.
    #[error("failed to read env file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A line did not match `KEY=VALUE` (strict mode only).
    #[error("malformed line {line} in '{path}': {content}")]
    Malformed {
        path: String,
        line: usize,
        content: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or merge configuration sources.
    #[error("failed to parse config ({sources}): {message}")]
    ParseError { sources: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Step Errors ---

/// Step execution errors.
#[derive(Debug, Error)]
pub enum StepError {
    /// Step was not found.
    #[error("step '{0}' not found")]
    NotFound(String),

    /// Step execution failed.
    #[error("step '{step}' failed: {message}")]
    Failed { step: String, message: String },

    /// Step was interrupted.
    #[error("step '{0}' was interrupted")]
    Interrupted(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    ///
    /// `stderr` holds the captured error output, empty when it was not kept.
    #[error("process '{command}' exited with code {code}{}", stderr_tail(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Last non-empty line of captured stderr, where Python puts the exception.
fn stderr_tail(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| format!(": {line}"))
        .unwrap_or_default()
}

// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!   Config    ParseError, InvalidValue
//!   Process   ExecutableNotFound, SpawnFailed, ExecFailed, WaitFailed, MissingStdout
//!   Relay     Convert, LineTooLong, Read, Write
//!   Convert   Empty, InteriorNul, InvalidEncoding, NoSpace, Os, Unavailable
//!
//!   Relay::Convert --source--> ConvertError
//!   binaries: anyhow::Error, printed as "vscode-git: {e:#}"
//! ```
//!
//! Every failure ends up as one diagnostic line on stderr, see [`diagnostic`].

use std::error::Error as StdError;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Prefix of every diagnostic printed by the wrapper.
pub const DIAGNOSTIC_PREFIX: &str = "vscode-git";

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration source.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Errors raised while running the wrapped tool.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn the child (pipe creation or executable lookup).
    #[error("failed to spawn '{command}'")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Replacing the process image failed.
    #[error("exec failed for '{command}'")]
    ExecFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child failed.
    #[error("failed to wait for '{command}'")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child was spawned without a captured stdout.
    #[error("stdout of '{command}' is not captured")]
    MissingStdout { command: String },
}

// --- Relay Errors ---

/// Errors that stop the rewrite loop.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A line could not be converted to a native path.
    #[error("failed to convert path '{line}'")]
    Convert {
        line: String,
        #[source]
        source: ConvertError,
    },

    /// A line did not fit in the line buffer.
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// Reading from the child's stdout failed.
    #[error("failed to read output of the wrapped tool")]
    Read(#[source] std::io::Error),

    /// Writing converted output failed.
    #[error("failed to write converted output")]
    Write(#[source] std::io::Error),
}

// --- Conversion Errors ---

/// Path conversion errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Zero-length input.
    #[error("empty path")]
    Empty,

    /// Input contains a NUL byte.
    #[error("path contains a NUL byte at offset {offset}")]
    InteriorNul { offset: usize },

    /// Input is not valid in the configured input encoding.
    #[error("line is not valid {encoding}")]
    InvalidEncoding { encoding: &'static str },

    /// Result does not fit in the wide buffer.
    #[error("native path needs {needed} wide characters, buffer holds {capacity}")]
    NoSpace { needed: usize, capacity: usize },

    /// The host primitive reported an error.
    #[error("host path conversion failed")]
    Os(#[source] std::io::Error),

    /// The requested converter is not compiled into this build.
    #[error("path converter '{0}' is not available on this host")]
    Unavailable(&'static str),
}

/// Renders an error and its source chain as a single line.
///
/// ```
/// use vscode_git_rs::error::{ConvertError, RelayError, diagnostic};
///
/// let err = RelayError::Convert { line: String::new(), source: ConvertError::Empty };
/// assert_eq!(diagnostic(&err), "failed to convert path '': empty path");
/// ```
#[must_use]
pub fn diagnostic(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Prints a diagnostic line for `err` on stderr.
pub fn report(err: &(dyn StdError + 'static)) {
    eprintln!("{DIAGNOSTIC_PREFIX}: {}", diagnostic(err));
}

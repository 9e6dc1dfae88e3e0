// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! # Config Structure
//!
//! ```text
//! Config: GitConfig, RelayConfig, PathsConfig, LogSection
//! EncodingSetting: utf8 | acp | oem | locale
//! ConverterKind:   auto | cygwin | mounts
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::{LogConfig, LogLevel};
use crate::relay::DEFAULT_MAX_LINE_LEN;
use crate::utility::encoding::Encoding;

/// Narrow encoding selection for relay input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingSetting {
    Utf8,
    Acp,
    Oem,
    /// Resolved from `LC_ALL` / `LC_CTYPE` / `LANG`.
    #[default]
    Locale,
}

impl EncodingSetting {
    /// Resolves the setting to a concrete encoding.
    #[must_use]
    pub fn resolve(self) -> Encoding {
        match self {
            Self::Utf8 => Encoding::Utf8,
            Self::Acp => Encoding::Acp,
            Self::Oem => Encoding::Oem,
            Self::Locale => Encoding::from_locale(),
        }
    }
}

/// Which path converter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// `cygwin` on Cygwin builds, `mounts` elsewhere.
    #[default]
    Auto,
    /// The Cygwin runtime's `cygwin_conv_path`.
    Cygwin,
    /// The configured mount table.
    Mounts,
}

/// The wrapped git executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Absolute path, or a bare name looked up in PATH.
    pub program: PathBuf,
    /// Value passed as argv[0] to the wrapped tool.
    pub argv0: String,
    /// Subcommand whose output is rewritten.
    pub intercept: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/bin/git"),
            argv0: "git".to_string(),
            intercept: "rev-parse".to_string(),
        }
    }
}

/// Rewrite loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Longest accepted line in bytes, terminator included.
    pub max_line_len: usize,
    /// Encoding of the wrapped tool's output.
    pub input_encoding: EncodingSetting,
    /// Encoding of the converted lines.
    pub output_encoding: EncodingSetting,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            input_encoding: EncodingSetting::Utf8,
            output_encoding: EncodingSetting::Locale,
        }
    }
}

/// Path conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Converter selection.
    pub converter: ConverterKind,
    /// Native directory mounted on `/`.
    pub root: String,
    /// Prefix under which drive letters appear.
    pub cygdrive: String,
    /// Keep relative paths relative.
    pub relative: bool,
    /// Extra mounts (POSIX prefix to native directory).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mounts: BTreeMap<String, String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            converter: ConverterKind::Auto,
            root: r"C:\cygwin64".to_string(),
            cygdrive: "/cygdrive".to_string(),
            relative: false,
            mounts: BTreeMap::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// Console (stderr) level, 0-5.
    pub level: LogLevel,
    /// Log file level, 0-5.
    pub file_level: LogLevel,
    /// Log file, disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: LogLevel::SILENT,
            file_level: LogLevel::DEBUG,
            file: None,
        }
    }
}

impl LogSection {
    /// Builds the logging configuration for this section.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.level)
            .with_file_level(self.file_level)
            .maybe_with_log_file(self.file.clone())
            .build()
    }
}

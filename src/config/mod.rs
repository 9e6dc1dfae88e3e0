// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for vscode-git-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. vscode-git.toml (exe dir, optional)
//! 3. VSCODE_GIT_CONFIG (required when set)
//! 4. VSCODE_GIT__* env vars
//! 5. overrides (vscode-git-path flags)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! VSCODE_GIT__GIT__PROGRAM=/opt/git/bin/git  → git.program
//! VSCODE_GIT__RELAY__MAX_LINE_LEN=65536      → relay.max_line_len
//! VSCODE_GIT__LOG__FILE=C:\temp\git.log      → log.file
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, LogSection, PathsConfig, RelayConfig};

/// Name of the optional configuration file beside the executable.
pub const CONFIG_FILE_NAME: &str = "vscode-git.toml";

/// Environment variable naming an extra configuration file.
pub const CONFIG_ENV: &str = "VSCODE_GIT_CONFIG";

/// Prefix of environment overrides (`VSCODE_GIT__<SECTION>__<KEY>`).
pub const ENV_PREFIX: &str = "VSCODE_GIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Wrapped tool.
    pub git: GitConfig,
    /// Rewrite loop.
    pub relay: RelayConfig,
    /// Path conversion.
    pub paths: PathsConfig,
    /// Logging.
    pub log: LogSection,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vscode_git_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("vscode-git.toml")
    ///     .with_env_prefix("VSCODE_GIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty program or intercept
    /// name, a `max_line_len` below 2, or a malformed mount entry.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        validate_git(&self.git)?;
        if self.relay.max_line_len < 2 {
            return Err(invalid(
                "relay",
                "max_line_len",
                format!("must be at least 2, got {}", self.relay.max_line_len),
            ));
        }
        if self.paths.root.is_empty() {
            return Err(invalid("paths", "root", "must not be empty"));
        }
        if !self.paths.cygdrive.starts_with('/') {
            return Err(invalid(
                "paths",
                "cygdrive",
                format!("'{}' is not an absolute POSIX path", self.paths.cygdrive),
            ));
        }
        for (posix, native) in &self.paths.mounts {
            if !posix.starts_with('/') {
                return Err(invalid(
                    "paths.mounts",
                    posix,
                    "mount point must be an absolute POSIX path",
                ));
            }
            if native.is_empty() {
                return Err(invalid("paths.mounts", posix, "native directory is empty"));
            }
        }
        Ok(())
    }
}

/// Checks the `[git]` section on its own.
pub(crate) fn validate_git(git: &GitConfig) -> std::result::Result<(), ConfigError> {
    if git.program.as_os_str().is_empty() {
        return Err(invalid("git", "program", "must not be empty"));
    }
    if git.intercept.is_empty() {
        return Err(invalid("git", "intercept", "must not be empty"));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.into(),
    }
}

// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::standard()
//!   = new()
//!     .add_toml_file_optional(<exe dir>/vscode-git.toml)
//!     .add_toml_file($VSCODE_GIT_CONFIG)
//!     .with_env_prefix("VSCODE_GIT")
//!   .set()
//!        |
//!        +--> build()     --> Config (validated)
//!        '--> build_git() --> GitConfig only, other sections ignored
//! ```

use std::path::{Path, PathBuf};

use super::types::GitConfig;
use super::{CONFIG_ENV, CONFIG_FILE_NAME, Config, ENV_PREFIX, validate_git};
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// The sources every binary loads: the file beside the executable, the
    /// file named by `VSCODE_GIT_CONFIG`, then `VSCODE_GIT__*` variables.
    #[must_use]
    pub fn standard() -> Self {
        let mut loader = Self::new();
        if let Some(dir) = exe_dir() {
            loader = loader.add_toml_file_optional(dir.join(CONFIG_FILE_NAME));
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            loader = loader.add_toml_file(PathBuf::from(path));
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(p.to_path_buf());
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(p.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push(PathBuf::from("<string>"));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Builds and validates the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - Environment variables cannot be parsed.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - [`Config::validate`] rejects a value.
    pub fn build(self) -> Result<Config> {
        let config: Config = self
            .merge()?
            .try_deserialize()
            .map_err(|e| merged_error(&e))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds only the `[git]` section.
    ///
    /// Unknown or invalid keys outside `[git]` are ignored. Sources that
    /// cannot be read still fail.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or `[git]` itself is invalid.
    pub fn build_git(self) -> Result<GitConfig> {
        let git = match self.merge()?.get::<GitConfig>("git") {
            Ok(git) => git,
            Err(config::ConfigError::NotFound(_)) => GitConfig::default(),
            Err(e) => return Err(merged_error(&e).into()),
        };
        validate_git(&git)?;
        Ok(git)
    }

    fn merge(self) -> std::result::Result<config::Config, ConfigError> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        builder.build().map_err(|e| ConfigError::ParseError {
            path: self
                .files
                .last()
                .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string()),
            message: e.to_string(),
        })
    }
}

fn merged_error(e: &config::ConfigError) -> ConfigError {
    ConfigError::ParseError {
        path: "<merged>".to_string(),
        message: e.to_string(),
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

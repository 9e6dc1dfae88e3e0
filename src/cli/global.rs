// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config and logging options of `vscode-git-path`.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional config files (can repeat)
//! --log-level N       ← Console verbosity (0-5)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← log.file override
//!
//! Precedence: flags > --config > standard sources > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Where configuration comes from and how much to log.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Adds `--config` files and the logging flags on top of `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn apply(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }

        if let Some(level) = self.log_level {
            loader = loader.set("log.level", i64::from(level))?;
        }

        // file level falls back to the console level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("log.file_level", i64::from(level))?;
        }

        if let Some(ref path) = self.log_file {
            loader = loader.set("log.file", path.display().to_string())?;
        }

        Ok(loader)
    }
}

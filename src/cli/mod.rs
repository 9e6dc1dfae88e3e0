// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI of the `vscode-git-path` helper using clap derive.
//!
//! The wrapper itself (`vscode-git`) takes no options of its own: every
//! argument belongs to git.
//!
//! ```text
//! vscode-git-path [-c FILE]... [-l N] [--log-file FILE] [-r] [--converter KIND] [PATH...]
//!                 (stdin when no PATH)
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::error::Result;
use clap::{Args, Parser};

/// Checks how the wrapper converts POSIX paths.
#[derive(Debug, Parser)]
#[command(
    name = "vscode-git-path",
    author,
    version,
    about = "Converts POSIX paths the way vscode-git does",
    long_about = "vscode-git-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Converts POSIX paths to native Windows paths with the same\n\
                  configuration vscode-git uses for `git rev-parse` output.",
    after_help = "CONFIG FILES:\n\n\
                  vscode-git-path reads `vscode-git.toml` beside the executable,\n\
                  then the file named by VSCODE_GIT_CONFIG, then\n\
                  VSCODE_GIT__<SECTION>__<KEY> environment variables. Files given\n\
                  with --config and the flags above are applied last."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

impl Cli {
    /// Standard sources plus everything given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let loader = self.global.apply(ConfigLoader::standard())?;
        self.convert.apply(loader)
    }
}

/// What to convert and how.
#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Keep relative paths relative.
    #[arg(short = 'r', long)]
    pub relative: bool,

    /// Converter to use instead of paths.converter.
    #[arg(long, value_name = "KIND", value_parser = ["auto", "cygwin", "mounts"])]
    pub converter: Option<String>,

    /// POSIX paths to convert.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

impl ConvertArgs {
    /// Adds `-r` and `--converter` on top of `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn apply(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if self.relative {
            loader = loader.set("paths.relative", true)?;
        }
        if let Some(ref kind) = self.converter {
            loader = loader.set("paths.converter", kind.as_str())?;
        }
        Ok(loader)
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

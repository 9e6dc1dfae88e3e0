// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pass-through versus rewrite decision.
//!
//! ```text
//! argv = [wrapper, a1, a2, ...]
//!              |
//!   a1 == intercept (exact bytes) ?
//!       no / absent --> PassThrough   git a1 a2 ...  (argv[0] = "git")
//!       yes         --> Rewrite       git a1 a2 ...  stdout piped
//! ```
//!
//! Only the first argument is inspected. `git -C dir rev-parse` passes
//! through unchanged.

use std::ffi::{OsStr, OsString};

use tracing::debug;

use crate::config::types::GitConfig;
use crate::core::process::ToolCommand;

/// The wrapper's own command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<OsString>,
}

impl Invocation {
    /// Captures the process arguments without requiring them to be UTF-8.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }

    /// Builds an invocation from a full argv, program name included.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// argv[1], the git subcommand (if any).
    #[must_use]
    pub fn subcommand(&self) -> Option<&OsStr> {
        self.args.get(1).map(OsString::as_os_str)
    }

    /// Everything after argv[0], forwarded verbatim to git.
    #[must_use]
    pub fn forwarded(&self) -> &[OsString] {
        self.args.get(1..).unwrap_or_default()
    }

    /// The full argv.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

/// What to do with an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Become git with the same arguments.
    PassThrough,
    /// Run git with captured stdout and convert every line.
    Rewrite,
}

/// Decides how each invocation is handled.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    git: GitConfig,
}

impl Dispatcher {
    #[must_use]
    pub fn new(git: &GitConfig) -> Self {
        Self { git: git.clone() }
    }

    /// Rewrite only when argv[1] equals the intercepted subcommand.
    #[must_use]
    pub fn plan(&self, invocation: &Invocation) -> Dispatch {
        let plan = match invocation.subcommand() {
            Some(sub) if sub == OsStr::new(&self.git.intercept) => Dispatch::Rewrite,
            _ => Dispatch::PassThrough,
        };
        debug!(
            subcommand = ?invocation.subcommand(),
            intercept = %self.git.intercept,
            ?plan,
            "dispatch"
        );
        plan
    }

    /// The git command line for `invocation`: argv[0] replaced, the rest forwarded.
    #[must_use]
    pub fn command(&self, invocation: &Invocation) -> ToolCommand {
        ToolCommand::from_config(&self.git).args(invocation.forwarded())
    }
}

#[cfg(test)]
mod tests;

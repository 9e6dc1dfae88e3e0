// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command builder for the wrapped tool.
//!
//! ```text
//! ToolCommand
//!  • new/from_config/resolve
//!  • argv0/arg/args/capture_stdout
//!  • build_command (tokio) / std_command (exec, spawn-and-wait)
//!
//! StdoutMode: Inherit (pass-through), Pipe (rewrite)
//! stdin and stderr are always inherited
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::config::types::GitConfig;
use crate::error::ProcessError;

/// Where the wrapped tool's stdout goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutMode {
    /// Shared with the wrapper.
    #[default]
    Inherit,
    /// Captured through a pipe read by the relay.
    Pipe,
}

/// One invocation of the wrapped tool.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Path to the executable
    program: PathBuf,
    /// Name the child sees as argv[0]
    argv0: Option<OsString>,
    /// Forwarded arguments
    args: Vec<OsString>,
    stdout: StdoutMode,
}

impl ToolCommand {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            argv0: None,
            args: Vec::new(),
            stdout: StdoutMode::Inherit,
        }
    }

    /// Creates a command for the configured git executable.
    #[must_use]
    pub fn from_config(git: &GitConfig) -> Self {
        let command = Self::new(&git.program);
        if git.argv0.is_empty() {
            command
        } else {
            command.argv0(&git.argv0)
        }
    }

    /// Sets the child's argv[0] (Unix only; ignored elsewhere).
    #[must_use]
    pub fn argv0(mut self, argv0: impl AsRef<OsStr>) -> Self {
        self.argv0 = Some(argv0.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Routes stdout into a pipe.
    #[must_use]
    pub const fn capture_stdout(mut self) -> Self {
        self.stdout = StdoutMode::Pipe;
        self
    }

    /// Resolves a bare program name through PATH.
    ///
    /// Paths containing a separator are kept as given; a missing file then
    /// surfaces as a spawn or exec failure.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ExecutableNotFound`] when a bare name is not in PATH.
    pub fn resolve(mut self) -> Result<Self, ProcessError> {
        if self.program.components().count() != 1 || self.program.is_absolute() {
            return Ok(self);
        }
        let name = self.program.to_string_lossy().into_owned();
        self.program =
            which::which(&self.program).map_err(|_| ProcessError::ExecutableNotFound { name })?;
        Ok(self)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn argv0_name(&self) -> Option<&OsStr> {
        self.argv0.as_deref()
    }

    #[must_use]
    pub fn args_slice(&self) -> &[OsString] {
        &self.args
    }

    #[must_use]
    pub const fn stdout_mode(&self) -> StdoutMode {
        self.stdout
    }

    /// Returns the display name for this process.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.argv0.as_ref().map_or_else(
            || {
                self.program.file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            |argv0| argv0.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program.display());
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    fn stdout_stdio(&self) -> Stdio {
        match self.stdout {
            StdoutMode::Inherit => Stdio::inherit(),
            StdoutMode::Pipe => Stdio::piped(),
        }
    }

    /// Builds the async command used by the relay.
    #[must_use]
    pub fn build_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(self.stdout_stdio())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        if let Some(argv0) = &self.argv0 {
            command.arg0(argv0);
        }
        command
    }

    /// Builds the blocking command used for pass-through.
    #[must_use]
    pub fn std_command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(self.stdout_stdio())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        if let Some(argv0) = &self.argv0 {
            use std::os::unix::process::CommandExt as _;
            command.arg0(argv0);
        }
        command
    }
}

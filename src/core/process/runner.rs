// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and exit status handling.
//!
//! ```text
//! pass_through()                      spawn_captured()
//!      |                                   |
//!   (unix) exec ---> never returns       spawn (stdout piped)
//!      |   on success                      |
//!      v                              CapturedChild
//!   ExecFailed                         take_stdout() --> relay
//!                                      wait() ---------> ChildExit
//!   (other) spawn + wait --> ChildExit
//!
//! ChildExit::Exited(code) --> code
//! ChildExit::Abnormal     --> FAILURE_STATUS
//! ```

use std::process::{ExitCode, ExitStatus};
use tokio::process::{Child, ChildStdout};
use tracing::{debug, trace};

use super::builder::ToolCommand;
use crate::error::ProcessError;

/// Exit status for every internal failure and for abnormal child termination.
pub const FAILURE_STATUS: u8 = 1;

/// How the wrapped tool terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Normal exit with the given code.
    Exited(i32),
    /// Killed by a signal or otherwise terminated abnormally.
    Abnormal,
}

impl ChildExit {
    /// The status the wrapper reports for this termination.
    #[must_use]
    pub fn code_or_failure(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Abnormal => i32::from(FAILURE_STATUS),
        }
    }

    /// Converts to a process exit code.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        exit_code(self.code_or_failure())
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        status.code().map_or(Self::Abnormal, Self::Exited)
    }
}

/// Maps a raw status onto an [`ExitCode`], using [`FAILURE_STATUS`] when it
/// does not fit in a byte.
#[must_use]
pub fn exit_code(status: i32) -> ExitCode {
    u8::try_from(status).map_or(ExitCode::from(FAILURE_STATUS), ExitCode::from)
}

/// A running child whose stdout is captured.
#[derive(Debug)]
pub struct CapturedChild {
    child: Child,
    command: String,
}

impl CapturedChild {
    /// Hands the read end of the stdout pipe to the caller.
    ///
    /// The parent never holds the write end; dropping the returned reader
    /// closes the read end.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::MissingStdout`] if stdout was not piped or was
    /// already taken.
    pub fn take_stdout(&mut self) -> Result<ChildStdout, ProcessError> {
        self.child
            .stdout
            .take()
            .ok_or_else(|| ProcessError::MissingStdout {
                command: self.command.clone(),
            })
    }

    /// Waits for the child to terminate.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::WaitFailed`] if the OS wait fails.
    pub async fn wait(mut self) -> Result<ChildExit, ProcessError> {
        // Close our read end first so a child still writing gets EPIPE
        // instead of blocking forever on a full pipe.
        drop(self.child.stdout.take());
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| ProcessError::WaitFailed {
                command: self.command.clone(),
                source,
            })?;
        let exit = ChildExit::from(status);
        trace!(command = %self.command, ?exit, "reaped");
        Ok(exit)
    }
}

impl ToolCommand {
    /// Spawns the tool with stdout routed into a pipe.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::SpawnFailed`] if the pipe or the child cannot
    /// be created.
    pub fn spawn_captured(self) -> Result<CapturedChild, ProcessError> {
        let this = self.capture_stdout();
        let command = this.command_line();
        debug!(cmd = %command, "spawn");

        let child = this
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.clone(),
                source,
            })?;
        trace!(process = %this.display_name(), pid = ?child.id(), "spawned");
        Ok(CapturedChild { child, command })
    }

    /// Becomes the wrapped tool.
    ///
    /// On Unix the process image is replaced and this only returns on
    /// failure. Elsewhere the tool is spawned with inherited streams and its
    /// termination is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ExecFailed`] when the image cannot be replaced,
    /// or [`ProcessError::SpawnFailed`]/[`ProcessError::WaitFailed`] on
    /// hosts without `exec`.
    #[cfg(unix)]
    pub fn pass_through(self) -> Result<ChildExit, ProcessError> {
        use std::os::unix::process::CommandExt as _;

        let command = self.command_line();
        debug!(cmd = %command, "exec");
        let source = self.std_command().exec();
        Err(ProcessError::ExecFailed { command, source })
    }

    /// Becomes the wrapped tool.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::SpawnFailed`] or [`ProcessError::WaitFailed`].
    #[cfg(not(unix))]
    pub fn pass_through(self) -> Result<ChildExit, ProcessError> {
        let command = self.command_line();
        debug!(cmd = %command, "spawn");
        let mut child =
            self.std_command()
                .spawn()
                .map_err(|source| ProcessError::SpawnFailed {
                    command: command.clone(),
                    source,
                })?;
        let status = child
            .wait()
            .map_err(|source| ProcessError::WaitFailed { command, source })?;
        Ok(ChildExit::from(status))
    }
}

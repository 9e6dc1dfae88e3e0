// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Running the wrapped tool.
//!
//! ```text
//! ToolCommand::from_config(&git)
//!   .args(forwarded) .resolve()
//!       pass_through()   --> exec (unix) / spawn + wait
//!       spawn_captured() --> CapturedChild { stdout pipe }
//!                              wait() --> ChildExit
//! ```

pub mod builder;
mod runner;

pub use builder::{StdoutMode, ToolCommand};
pub use runner::{CapturedChild, ChildExit, FAILURE_STATUS, exit_code};

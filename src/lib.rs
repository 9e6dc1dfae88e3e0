// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                 main.rs (vscode-git)        bin/vscode-git-path.rs
//!                        |                              |
//!                        v                              v
//!                    dispatch                  cli (clap) --> cmd
//!          argv[1] == intercept ?                       |
//!             /                \                        |
//!            v                  v                       |
//!      pass_through           relay                     |
//!      exec / spawn     spawn | read | convert          |
//!            \          encode | write | wait           |
//!             \                 |                       |
//!              v                v                       v
//!   ,------------------------------------------------------------,
//!   |  core::process   ToolCommand, CapturedChild, ChildExit     |
//!   |  convert         PathConverter: cygwin FFI | mount table   |
//!   |  config          TOML + VSCODE_GIT__* layered settings     |
//!   +------------------------------------------------------------+
//!   |  foundation      error, logging, utility::encoding         |
//!   '------------------------------------------------------------'
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod convert;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod relay;
pub mod utility;

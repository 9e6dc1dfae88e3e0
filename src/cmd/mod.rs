// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations of `vscode-git-path`.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   convert
//! ```

pub mod convert;

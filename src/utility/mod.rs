// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_strict()  UTF-8/CP1252/CP866 --> UTF-8 (None if malformed)
//!   WideEncoder      UTF-16 --> UTF-8/CP1252/CP866
//!   Encoding::from_locale()
//! ```

pub mod encoding;

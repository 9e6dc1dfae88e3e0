// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversion through the Cygwin runtime.
//!
//! ```text
//! CString(posix) --> cygwin_conv_path(CCP_POSIX_TO_WIN_W | flags, from, to, bytes)
//!                      0  --> wide buffer, NUL-terminated
//!                     -1  --> errno (EINVAL, ENOSPC, ENOENT, ...)
//! ```

use std::ffi::{CString, c_void};

use crate::error::ConvertError;

use super::{CCP_POSIX_TO_WIN_W, ConvertFlags, PathConverter, WIDE_CAPACITY, check_input};

unsafe extern "C" {
    fn cygwin_conv_path(what: u32, from: *const c_void, to: *mut c_void, size: usize) -> isize;
}

/// Converts paths with the mount table of the running Cygwin installation.
#[derive(Debug, Clone)]
pub struct CygwinConverter {
    flags: ConvertFlags,
    capacity: usize,
}

impl CygwinConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: ConvertFlags::empty(),
            capacity: WIDE_CAPACITY,
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: ConvertFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for CygwinConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathConverter for CygwinConverter {
    fn name(&self) -> &'static str {
        "cygwin"
    }

    fn convert_into(&self, posix: &str, wide: &mut Vec<u16>) -> Result<(), ConvertError> {
        check_input(posix)?;
        let from = CString::new(posix).map_err(|e| ConvertError::InteriorNul {
            offset: e.nul_position(),
        })?;

        wide.clear();
        wide.resize(self.capacity, 0);

        // SAFETY: `from` is NUL-terminated and `wide` owns `capacity` u16 units;
        // the size argument is that capacity in bytes.
        let rc = unsafe {
            cygwin_conv_path(
                CCP_POSIX_TO_WIN_W | self.flags.bits(),
                from.as_ptr().cast(),
                wide.as_mut_ptr().cast(),
                wide.len() * size_of::<u16>(),
            )
        };
        if rc != 0 {
            wide.clear();
            return Err(ConvertError::Os(std::io::Error::last_os_error()));
        }

        let len = wide.iter().position(|&unit| unit == 0).unwrap_or(wide.len());
        wide.truncate(len);
        Ok(())
    }
}

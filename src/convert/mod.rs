// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! POSIX to native (Windows) path conversion.
//!
//! ```text
//! PathConverter::convert_into(posix, &mut wide)
//!        |
//!        +-- CygwinConverter      cygwin_conv_path(CCP_POSIX_TO_WIN_W)
//!        |                        (target_os = "cygwin" only)
//!        |
//!        '-- MountTableConverter  /cygdrive/c/x     -> C:\x
//!                                 /home/u (mount)   -> D:\home\u
//!                                 /usr/bin          -> <root>\bin
//!                                 /etc              -> <root>\etc
//!                                 C:/x, //srv/share -> C:\x, \\srv\share
//!
//! from_config(&PathsConfig) --> Box<dyn PathConverter>
//!   auto: cygwin on Cygwin builds, mounts elsewhere
//! ```

use bitflags::bitflags;

use crate::config::types::{ConverterKind, PathsConfig};
use crate::error::ConvertError;

#[cfg(target_os = "cygwin")]
mod cygwin;
mod mounts;

#[cfg(target_os = "cygwin")]
pub use cygwin::CygwinConverter;
pub use mounts::MountTableConverter;

/// Capacity of the wide result buffer in UTF-16 units, terminator included.
pub const WIDE_CAPACITY: usize = 32 * 1024;

/// Paths at least this long (in UTF-16 units) get the `\\?\` prefix.
pub const MAX_PATH: usize = 260;

/// Conversion direction understood by `cygwin_conv_path`: POSIX to wide Win32.
pub const CCP_POSIX_TO_WIN_W: u32 = 1;

bitflags! {
    /// Modifier flags OR-ed into the conversion direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ConvertFlags: u32 {
        /// Keep relative paths relative instead of resolving them against the cwd
        const RELATIVE = 0x100;
    }
}

/// A POSIX to native path translation primitive.
pub trait PathConverter: std::fmt::Debug + Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Converts `posix` into its wide native form.
    ///
    /// `wide` is cleared first and holds the result without a terminator on
    /// success. Its contents are unspecified on failure.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] for empty input, input containing NUL, a
    /// result that does not fit in the wide buffer, or a host-level failure.
    fn convert_into(&self, posix: &str, wide: &mut Vec<u16>) -> Result<(), ConvertError>;

    /// Converts `posix` into a freshly allocated wide buffer.
    ///
    /// # Errors
    ///
    /// See [`PathConverter::convert_into`].
    fn to_native_wide(&self, posix: &str) -> Result<Vec<u16>, ConvertError> {
        let mut wide = Vec::new();
        self.convert_into(posix, &mut wide)?;
        Ok(wide)
    }

    /// Converts `posix` into a native path string.
    ///
    /// # Errors
    ///
    /// See [`PathConverter::convert_into`].
    fn to_native(&self, posix: &str) -> Result<String, ConvertError> {
        self.to_native_wide(posix)
            .map(|wide| String::from_utf16_lossy(&wide))
    }
}

/// Rejects inputs every converter refuses: empty strings and embedded NULs.
///
/// # Errors
///
/// Returns [`ConvertError::Empty`] or [`ConvertError::InteriorNul`].
pub fn check_input(posix: &str) -> Result<(), ConvertError> {
    if posix.is_empty() {
        return Err(ConvertError::Empty);
    }
    if let Some(offset) = posix.bytes().position(|b| b == 0) {
        return Err(ConvertError::InteriorNul { offset });
    }
    Ok(())
}

/// Builds the converter selected by the `[paths]` configuration.
///
/// # Errors
///
/// Returns [`ConvertError::Unavailable`] when `converter = "cygwin"` is
/// requested on a build without the Cygwin runtime.
pub fn from_config(paths: &PathsConfig) -> Result<Box<dyn PathConverter>, ConvertError> {
    let flags = if paths.relative {
        ConvertFlags::RELATIVE
    } else {
        ConvertFlags::empty()
    };

    match paths.converter {
        ConverterKind::Mounts => Ok(Box::new(
            MountTableConverter::from_config(paths).with_flags(flags),
        )),
        #[cfg(target_os = "cygwin")]
        ConverterKind::Auto | ConverterKind::Cygwin => {
            Ok(Box::new(CygwinConverter::new().with_flags(flags)))
        }
        #[cfg(not(target_os = "cygwin"))]
        ConverterKind::Auto => Ok(Box::new(
            MountTableConverter::from_config(paths).with_flags(flags),
        )),
        #[cfg(not(target_os = "cygwin"))]
        ConverterKind::Cygwin => Err(ConvertError::Unavailable("cygwin")),
    }
}

/// Encodes `native` into `wide`, enforcing `capacity` (terminator included).
fn fill_wide(native: &str, wide: &mut Vec<u16>, capacity: usize) -> Result<(), ConvertError> {
    wide.clear();
    wide.extend(native.encode_utf16());
    let needed = wide.len() + 1;
    if needed > capacity {
        wide.clear();
        return Err(ConvertError::NoSpace { needed, capacity });
    }
    Ok(())
}

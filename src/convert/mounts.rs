// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Portable mount-table conversion.
//!
//! ```text
//! input ----------------------------------------------- output
//! C:/x  c:\x\..\y                    native as-is   --> C:\x  c:\y
//! //srv/share/x                      UNC            --> \\srv\share\x
//! a/b     (RELATIVE)                 flip seps      --> a\b
//! a/b                                cwd + a/b      --> (absolute rules)
//! /cygdrive/d/src                    cygdrive       --> D:\src
//! /home/u       with "/home" mount   longest prefix --> D:\home\u
//! /usr/bin/git                       implicit mount --> <root>\bin\git
//! /etc/passwd                        root mount     --> <root>\etc\passwd
//! ```
//!
//! `.`, `..` and repeated separators are normalised before mapping. Results
//! of [`MAX_PATH`] units or more receive the `\\?\` long-path prefix.

use crate::config::types::PathsConfig;
use crate::error::ConvertError;

use super::{ConvertFlags, MAX_PATH, PathConverter, WIDE_CAPACITY, check_input, fill_wide};

/// One POSIX prefix mapped onto a native directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mount {
    segments: Vec<String>,
    native: String,
}

/// Converts POSIX paths with an explicit Cygwin-style mount table.
///
/// # Example
/// ```
/// use vscode_git_rs::convert::{MountTableConverter, PathConverter};
///
/// let converter = MountTableConverter::new(r"C:\cygwin64").with_mount("/home", r"D:\home");
/// assert_eq!(converter.to_native("/home/user/project")?, r"D:\home\user\project");
/// assert_eq!(converter.to_native("/cygdrive/c/Windows")?, r"C:\Windows");
/// assert_eq!(converter.to_native("/usr/bin/git")?, r"C:\cygwin64\bin\git");
/// # Ok::<(), vscode_git_rs::error::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MountTableConverter {
    root: String,
    cygdrive: Vec<String>,
    mounts: Vec<Mount>,
    cwd: Option<String>,
    flags: ConvertFlags,
    capacity: usize,
}

impl MountTableConverter {
    /// Creates a converter for an installation rooted at `root`.
    ///
    /// Like Cygwin, `/usr/bin` and `/usr/lib` are mounted on `<root>\bin` and
    /// `<root>\lib`, and the cygdrive prefix is `/cygdrive`.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let root = trim_native(&root.into());
        let bin = format!(r"{root}\bin");
        let lib = format!(r"{root}\lib");
        Self {
            root,
            cygdrive: posix_segments("/cygdrive"),
            mounts: Vec::new(),
            cwd: None,
            flags: ConvertFlags::empty(),
            capacity: WIDE_CAPACITY,
        }
        .with_mount("/usr/bin", bin)
        .with_mount("/usr/lib", lib)
    }

    /// Builds a converter from the `[paths]` configuration section.
    #[must_use]
    pub fn from_config(paths: &PathsConfig) -> Self {
        paths.mounts.iter().fold(
            Self::new(paths.root.as_str()).with_cygdrive(&paths.cygdrive),
            |converter, (posix, native)| converter.with_mount(posix, native.as_str()),
        )
    }

    /// Sets the cygdrive prefix (`/` gives MSYS2-style `/c/...` drives).
    #[must_use]
    pub fn with_cygdrive(mut self, prefix: &str) -> Self {
        self.cygdrive = posix_segments(prefix);
        self
    }

    /// Mounts `native` on `posix`, replacing an existing mount of the same prefix.
    #[must_use]
    pub fn with_mount(mut self, posix: &str, native: impl Into<String>) -> Self {
        let mount = Mount {
            segments: posix_segments(posix),
            native: trim_native(&native.into()),
        };
        self.mounts.retain(|m| m.segments != mount.segments);
        self.mounts.push(mount);
        // Longest prefix wins
        self.mounts
            .sort_by(|a, b| b.segments.len().cmp(&a.segments.len()));
        self
    }

    /// Resolves relative inputs against `cwd` instead of the process directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: ConvertFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the wide buffer capacity in UTF-16 units, terminator included.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the native root directory.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    fn translate(&self, posix: &str) -> Result<String, ConvertError> {
        if let Some(native) = native_form(posix) {
            return Ok(native);
        }
        if posix.starts_with(['/', '\\']) {
            return Ok(self.map_absolute(&normalize(posix)));
        }
        if self.flags.contains(ConvertFlags::RELATIVE) {
            return Ok(posix.replace('/', "\\"));
        }

        let joined = format!("{}/{posix}", self.current_dir()?);
        if let Some(native) = native_form(&joined) {
            Ok(native)
        } else if joined.starts_with('/') {
            Ok(self.map_absolute(&normalize(&joined)))
        } else {
            Err(ConvertError::Os(std::io::Error::other(format!(
                "current directory '{joined}' is not absolute"
            ))))
        }
    }

    fn current_dir(&self) -> Result<String, ConvertError> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir()
                .map(|dir| dir.to_string_lossy().into_owned())
                .map_err(ConvertError::Os),
        }
    }

    fn map_absolute(&self, segments: &[&str]) -> String {
        let prefix = self.cygdrive.len();
        if segments.len() > prefix
            && starts_with(segments, &self.cygdrive)
            && let Some(drive) = drive_letter(segments[prefix])
        {
            return join_native(&format!("{drive}:"), &segments[prefix + 1..]);
        }

        if let Some(mount) = self
            .mounts
            .iter()
            .find(|mount| starts_with(segments, &mount.segments))
        {
            return join_native(&mount.native, &segments[mount.segments.len()..]);
        }

        if segments.is_empty() {
            return format!(r"{}\", self.root);
        }
        join_native(&self.root, segments)
    }
}

impl PathConverter for MountTableConverter {
    fn name(&self) -> &'static str {
        "mounts"
    }

    fn convert_into(&self, posix: &str, wide: &mut Vec<u16>) -> Result<(), ConvertError> {
        check_input(posix)?;
        let native = long_path(self.translate(posix)?);
        fill_wide(&native, wide, self.capacity)
    }
}

const fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Recognises inputs that already are native: `X:`, `X:\...`, `X:/...` and UNC.
fn native_form(path: &str) -> Option<String> {
    let bytes = path.as_bytes();

    if bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || is_separator(bytes[2]))
    {
        return Some(join_native(&path[..2], &normalize(&path[2..])));
    }

    if bytes.len() > 2 && is_separator(bytes[0]) && is_separator(bytes[1]) && !is_separator(bytes[2])
    {
        return Some(format!(r"\\{}", normalize(&path[2..]).join(r"\")));
    }

    None
}

/// Splits on both separators, dropping empty and `.` segments and resolving `..`.
fn normalize(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

fn posix_segments(path: &str) -> Vec<String> {
    normalize(path).into_iter().map(String::from).collect()
}

fn starts_with(segments: &[&str], prefix: &[String]) -> bool {
    segments.len() >= prefix.len() && segments.iter().zip(prefix).all(|(a, b)| *a == b.as_str())
}

fn drive_letter(segment: &str) -> Option<char> {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Forward slashes become backslashes; trailing separators are dropped (`C:\` keeps `C:`).
fn trim_native(native: &str) -> String {
    native.replace('/', "\\").trim_end_matches('\\').to_string()
}

fn join_native(base: &str, rest: &[&str]) -> String {
    let mut native = base.to_string();
    if rest.is_empty() && native.ends_with(':') {
        native.push('\\');
    }
    for segment in rest {
        native.push('\\');
        native.push_str(segment);
    }
    native
}

/// Adds the Win32 long-path prefix to absolute results of `MAX_PATH` units or more.
fn long_path(native: String) -> String {
    if native.encode_utf16().count() < MAX_PATH || native.starts_with(r"\\?\") {
        return native;
    }
    if let Some(share) = native.strip_prefix(r"\\") {
        return format!(r"\\?\UNC\{share}");
    }
    let bytes = native.as_bytes();
    if bytes.len() >= 3 && bytes[1] == b':' && bytes[2] == b'\\' {
        return format!(r"\\?\{native}");
    }
    native
}

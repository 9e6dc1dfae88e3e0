// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Narrow/wide text conversion for relayed lines.
//!
//! ```text
//! child stdout        relay               wrapper stdout
//! bytes --(decode)--> UTF-8 --(convert)--> UTF-16 --(encode)--> bytes
//!       decode_strict()        PathConverter          WideEncoder
//! ```
//!
//! Uses `encoding_rs` for the legacy code pages. Input that is not valid in
//! its encoding is rejected; characters the output code page cannot
//! represent become `?`.

use encoding_rs::{EncoderResult, IBM866, WINDOWS_1252};
use std::borrow::Cow;

/// Encoding of a narrow byte stream.
///
/// Maps to Windows code pages:
/// - `Utf8`: UTF-8 (65001)
/// - `Acp`: Active Code Page, typically Windows-1252 (1252)
/// - `Oem`: OEM Code Page, IBM866 (866)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 (code page 65001)
    Utf8,
    /// Active Code Page - typically Windows-1252
    Acp,
    /// OEM Code Page
    Oem,
}

impl Encoding {
    /// Resolves the narrow encoding the way `setlocale(LC_CTYPE, "")` does.
    ///
    /// The first non-empty of `LC_ALL`, `LC_CTYPE` and `LANG` names the locale.
    #[must_use]
    pub fn from_locale() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty());
        locale.map_or(Self::Utf8, |name| Self::from_locale_name(&name))
    }

    /// Maps a locale name (`en_US.UTF-8`, `de_DE.CP1252`, `C`) to an encoding.
    ///
    /// Cygwin's default charset is UTF-8, so `C`, `POSIX` and unknown
    /// charsets resolve to [`Encoding::Utf8`].
    ///
    /// ```
    /// use vscode_git_rs::utility::encoding::Encoding;
    ///
    /// assert_eq!(Encoding::from_locale_name("en_US.UTF-8"), Encoding::Utf8);
    /// assert_eq!(Encoding::from_locale_name("de_DE.CP1252"), Encoding::Acp);
    /// assert_eq!(Encoding::from_locale_name("ru_RU.CP866@euro"), Encoding::Oem);
    /// ```
    #[must_use]
    pub fn from_locale_name(name: &str) -> Self {
        let charset = name
            .split_once('.')
            .map_or("", |(_, rest)| rest.split('@').next().unwrap_or(rest));
        let normalized: String = charset
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "cp1252" | "windows1252" | "iso88591" | "latin1" => Self::Acp,
            "cp866" | "ibm866" | "cp437" | "ibm437" => Self::Oem,
            _ => Self::Utf8,
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Acp => "acp",
            Self::Oem => "oem",
        }
    }

    fn legacy(self) -> Option<&'static encoding_rs::Encoding> {
        match self {
            Self::Utf8 => None,
            Self::Acp => Some(WINDOWS_1252),
            Self::Oem => Some(IBM866),
        }
    }
}

/// Decodes `bytes` from the given encoding, rejecting malformed input.
///
/// Returns `None` when `bytes` is not valid in `encoding`; nothing is ever
/// replaced with U+FFFD.
///
/// # Example
/// ```
/// use vscode_git_rs::utility::encoding::{decode_strict, Encoding};
///
/// let cp1252_bytes = b"/home/caf\xe9"; // "café" in Windows-1252
/// assert_eq!(decode_strict(Encoding::Acp, cp1252_bytes).as_deref(), Some("/home/café"));
/// assert_eq!(decode_strict(Encoding::Utf8, cp1252_bytes), None);
/// ```
#[must_use]
pub fn decode_strict(encoding: Encoding, bytes: &[u8]) -> Option<Cow<'_, str>> {
    match encoding.legacy() {
        None => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
        Some(legacy) => legacy.decode_without_bom_handling_and_without_replacement(bytes),
    }
}

/// Re-encodes wide (UTF-16) text into a narrow byte stream.
///
/// Holds a scratch buffer that is reused across calls, so one encoder can
/// serve every line of a relay.
///
/// # Example
/// ```
/// use vscode_git_rs::utility::encoding::{Encoding, WideEncoder};
///
/// let wide: Vec<u16> = r"C:\Users\José".encode_utf16().collect();
/// let mut encoder = WideEncoder::new(Encoding::Acp);
/// let mut out = Vec::new();
/// encoder.encode_into(&wide, &mut out);
/// assert_eq!(out, b"C:\\Users\\Jos\xe9");
/// ```
#[derive(Debug)]
pub struct WideEncoder {
    encoding: Encoding,
    text: String,
}

impl WideEncoder {
    /// Creates an encoder producing `encoding` bytes.
    #[must_use]
    pub const fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            text: String::new(),
        }
    }

    /// Returns the target encoding.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Encodes `wide` into `out`, replacing its previous contents.
    ///
    /// Unpaired surrogates become U+FFFD (`?` for legacy code pages).
    /// Returns the number of characters that could not be represented.
    pub fn encode_into(&mut self, wide: &[u16], out: &mut Vec<u8>) -> usize {
        self.text.clear();
        let mut unmappable = 0;
        for decoded in char::decode_utf16(wide.iter().copied()) {
            self.text.push(decoded.unwrap_or_else(|_| {
                unmappable += 1;
                char::REPLACEMENT_CHARACTER
            }));
        }

        out.clear();
        match self.encoding.legacy() {
            None => out.extend_from_slice(self.text.as_bytes()),
            Some(legacy) => unmappable = encode_legacy(legacy, &self.text, out),
        }
        unmappable
    }
}

/// Encodes `text` with a single-byte code page, writing `?` for unmappable characters.
fn encode_legacy(legacy: &'static encoding_rs::Encoding, text: &str, out: &mut Vec<u8>) -> usize {
    let mut encoder = legacy.new_encoder();
    let mut chunk = [0u8; 1024];
    let mut src = text;
    let mut unmappable = 0;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut chunk, true);
        out.extend_from_slice(&chunk[..written]);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                out.push(b'?');
                unmappable += 1;
            }
        }
    }
    unmappable
}

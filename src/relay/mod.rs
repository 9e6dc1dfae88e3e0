// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrite mode: capture git's stdout and convert every line.
//!
//! ```text
//!  spawn git (stdout piped, stdin/stderr inherited)
//!        |
//!        v
//!  LineReader ---- line (one '\n' stripped, <= max_line_len)
//!        |
//!        v
//!  decode_strict(input_encoding) ---- malformed: InvalidEncoding
//!        |
//!        v
//!  PathConverter::convert_into --> wide (UTF-16)
//!        |                            |
//!        | error: report, stop        v
//!        |                  WideEncoder(output_encoding)
//!        |                            |
//!        |                            v
//!        |                  write line + '\n', flush
//!        v
//!  drop pipe --> wait git --> RewriteOutcome
//!
//!  exit: relay error --> 1
//!        Exited(code) --> code
//!        Abnormal     --> 1
//! ```
//!
//! Lines are handled strictly in order and each one is flushed before the
//! next is read.

use std::io::Write;

use bon::Builder;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{debug, trace, warn};

use crate::config::types::RelayConfig;
use crate::convert::PathConverter;
use crate::core::process::{ChildExit, FAILURE_STATUS, ToolCommand};
use crate::error::{ConvertError, ProcessError, RelayError, report};
use crate::utility::encoding::{Encoding, WideEncoder, decode_strict};

/// Default line limit in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 32 * 1024;

/// Settings of one rewrite run.
#[derive(Debug, Clone, Builder)]
pub struct RelaySettings {
    #[builder(setters(name = with_max_line_len), default = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
    #[builder(setters(name = with_input_encoding), default = Encoding::Utf8)]
    input_encoding: Encoding,
    #[builder(setters(name = with_output_encoding), default = Encoding::Utf8)]
    output_encoding: Encoding,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RelaySettings {
    /// Resolves the `[relay]` section, reading the locale where asked to.
    #[must_use]
    pub fn from_config(relay: &RelayConfig) -> Self {
        Self::builder()
            .with_max_line_len(relay.max_line_len)
            .with_input_encoding(relay.input_encoding.resolve())
            .with_output_encoding(relay.output_encoding.resolve())
            .build()
    }

    #[must_use]
    pub const fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    #[must_use]
    pub const fn input_encoding(&self) -> Encoding {
        self.input_encoding
    }

    #[must_use]
    pub const fn output_encoding(&self) -> Encoding {
        self.output_encoding
    }
}

/// Reads `\n`-terminated lines of bounded length.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    max_line_len: usize,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    #[must_use]
    pub fn new(reader: R, max_line_len: usize) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(max_line_len.min(DEFAULT_MAX_LINE_LEN)),
            max_line_len,
        }
    }

    /// Returns the next line without its terminator, or `None` at end of stream.
    ///
    /// Exactly one trailing `\n` is removed; a final line without one is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::LineTooLong`] when `max_line_len` bytes arrive
    /// without a terminator and the stream continues, or [`RelayError::Read`].
    pub async fn next_line(&mut self) -> Result<Option<&[u8]>, RelayError> {
        self.buf.clear();
        let limit = u64::try_from(self.max_line_len).unwrap_or(u64::MAX);
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(RelayError::Read)?;

        if read == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        } else if read == self.max_line_len {
            let rest = self.reader.fill_buf().await.map_err(RelayError::Read)?;
            if !rest.is_empty() {
                return Err(RelayError::LineTooLong {
                    limit: self.max_line_len,
                });
            }
        }
        Ok(Some(&self.buf))
    }
}

/// Counters of one relay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Lines converted and written.
    pub lines: usize,
    /// Characters written as `?` because the output encoding lacks them.
    pub unmappable: usize,
}

/// Converts lines with per-run scratch buffers.
#[derive(Debug)]
pub struct Relay<'a> {
    converter: &'a dyn PathConverter,
    settings: RelaySettings,
    wide: Vec<u16>,
    narrow: Vec<u8>,
    encoder: WideEncoder,
    unmappable: usize,
}

impl<'a> Relay<'a> {
    #[must_use]
    pub fn new(converter: &'a dyn PathConverter, settings: RelaySettings) -> Self {
        let encoder = WideEncoder::new(settings.output_encoding());
        Self {
            converter,
            settings,
            wide: Vec::new(),
            narrow: Vec::new(),
            encoder,
            unmappable: 0,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Converts one line (terminator already stripped) to its narrow native form.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Convert`] when the line is not valid in the
    /// input encoding or the converter rejects it.
    pub fn convert_line(&mut self, line: &[u8]) -> Result<&[u8], RelayError> {
        let encoding = self.settings.input_encoding();
        let Some(posix) = decode_strict(encoding, line) else {
            return Err(RelayError::Convert {
                line: String::from_utf8_lossy(line).into_owned(),
                source: ConvertError::InvalidEncoding {
                    encoding: encoding.name(),
                },
            });
        };
        if let Err(source) = self.converter.convert_into(&posix, &mut self.wide) {
            return Err(RelayError::Convert {
                line: posix.into_owned(),
                source,
            });
        }

        let unmappable = self.encoder.encode_into(&self.wide, &mut self.narrow);
        if unmappable > 0 {
            warn!(line = %posix, unmappable, "characters not representable in output encoding");
            self.unmappable += unmappable;
        }
        trace!(posix = %posix, native = %String::from_utf16_lossy(&self.wide), "converted");
        Ok(&self.narrow)
    }

    /// Converts every line of `reader` into `writer`, flushing after each one.
    ///
    /// Stops at the first failure; lines after it are never read.
    ///
    /// # Errors
    ///
    /// Returns the [`RelayError`] that stopped the loop.
    pub async fn pump<R, W>(&mut self, reader: R, writer: &mut W) -> Result<RelayStats, RelayError>
    where
        R: AsyncBufRead + Unpin,
        W: Write + ?Sized,
    {
        let mut lines = LineReader::new(reader, self.settings.max_line_len());
        let mut count = 0;

        while let Some(line) = lines.next_line().await? {
            let native = self.convert_line(line)?;
            writer.write_all(native).map_err(RelayError::Write)?;
            writer.write_all(b"\n").map_err(RelayError::Write)?;
            writer.flush().map_err(RelayError::Write)?;
            count += 1;
        }

        Ok(RelayStats {
            lines: count,
            unmappable: self.unmappable,
        })
    }
}

/// Result of a rewrite run: the relay's own result and how git ended.
#[derive(Debug)]
pub struct RewriteOutcome {
    pub relay: Result<RelayStats, RelayError>,
    pub child: ChildExit,
}

impl RewriteOutcome {
    /// Relay failure wins; otherwise git's own status.
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        match self.relay {
            Err(_) => i32::from(FAILURE_STATUS),
            Ok(_) => self.child.code_or_failure(),
        }
    }
}

/// Runs `command` with captured stdout, writing converted lines to `writer`.
///
/// A relay failure is reported on stderr before git is waited on. Git is
/// always waited on once it has been spawned.
///
/// # Errors
///
/// Returns a [`ProcessError`] if git cannot be spawned or waited on.
pub async fn run_rewrite_to<W>(
    command: ToolCommand,
    converter: &dyn PathConverter,
    settings: RelaySettings,
    writer: &mut W,
) -> Result<RewriteOutcome, ProcessError>
where
    W: Write + ?Sized,
{
    let mut child = command.spawn_captured()?;
    let stdout = match child.take_stdout() {
        Ok(stdout) => stdout,
        Err(err) => {
            let _ = child.wait().await;
            return Err(err);
        }
    };

    let reader = BufReader::with_capacity(settings.max_line_len().max(8 * 1024), stdout);
    let relay = Relay::new(converter, settings).pump(reader, writer).await;
    match &relay {
        Ok(stats) => debug!(lines = stats.lines, unmappable = stats.unmappable, "relay done"),
        Err(err) => report(err),
    }

    let exit = child.wait().await?;
    debug!(?exit, "child finished");
    Ok(RewriteOutcome { relay, child: exit })
}

/// [`run_rewrite_to`] on the wrapper's stdout.
///
/// # Errors
///
/// See [`run_rewrite_to`].
pub async fn run_rewrite(
    command: ToolCommand,
    converter: &dyn PathConverter,
    settings: RelaySettings,
) -> Result<RewriteOutcome, ProcessError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_rewrite_to(command, converter, settings, &mut out).await
}

#[cfg(test)]
mod tests;

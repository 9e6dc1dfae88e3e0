// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runs paths through the wrapper's converter.
//!
//! ```text
//! PATH...  --> Relay::convert_line (UTF-8 in) --> out, one per line
//! (none)   --> Relay::pump(stdin)             --> out, one per line
//! ```

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::convert;
use crate::error::Result;
use crate::relay::{Relay, RelaySettings};
use crate::utility::encoding::Encoding;

/// Converts `args.paths`, or every line of stdin when none are given.
///
/// # Errors
///
/// Returns an error on the first path that cannot be converted, or if the
/// configured converter is unavailable.
pub async fn run_convert_command<W: Write + ?Sized>(
    args: &ConvertArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    if args.paths.is_empty() {
        let stdin = BufReader::new(tokio::io::stdin());
        return convert_stream(config, stdin, out).await;
    }
    convert_paths(&args.paths, config, out)
}

/// Converts each of `paths` and writes one native path per line.
///
/// # Errors
///
/// Returns an error on the first failure.
pub fn convert_paths<W: Write + ?Sized>(paths: &[String], config: &Config, out: &mut W) -> Result<()> {
    let converter = convert::from_config(&config.paths)?;
    // Arguments are already UTF-8
    let settings = RelaySettings::builder()
        .with_max_line_len(config.relay.max_line_len)
        .with_input_encoding(Encoding::Utf8)
        .with_output_encoding(config.relay.output_encoding.resolve())
        .build();
    let mut relay = Relay::new(converter.as_ref(), settings);

    for path in paths {
        let native = relay.convert_line(path.as_bytes())?;
        write_line(out, native).context("failed to write converted path")?;
    }
    info!(count = paths.len(), converter = converter.name(), "converted");
    Ok(())
}

fn write_line<W: Write + ?Sized>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Converts every line of `reader`, exactly like the wrapper's rewrite loop.
///
/// # Errors
///
/// Returns an error on the first failure.
pub async fn convert_stream<R, W>(config: &Config, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + ?Sized,
{
    let converter = convert::from_config(&config.paths)?;
    let stats = Relay::new(converter.as_ref(), RelaySettings::from_config(&config.relay))
        .pump(reader, out)
        .await?;
    info!(lines = stats.lines, converter = converter.name(), "converted");
    Ok(())
}

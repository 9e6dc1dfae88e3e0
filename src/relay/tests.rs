// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;

use super::*;
use crate::config::types::{EncodingSetting, RelayConfig};
use crate::convert::MountTableConverter;
use crate::error::ConvertError;

fn converter() -> MountTableConverter {
    MountTableConverter::new(r"C:\cygwin64").with_mount("/home", r"D:\home")
}

/// Fails on any line containing "bad".
#[derive(Debug)]
struct FailOnBad;

impl PathConverter for FailOnBad {
    fn name(&self) -> &'static str {
        "fail-on-bad"
    }

    fn convert_into(&self, posix: &str, wide: &mut Vec<u16>) -> Result<(), ConvertError> {
        if posix.contains("bad") {
            return Err(ConvertError::Os(std::io::Error::from_raw_os_error(22)));
        }
        wide.clear();
        wide.extend(posix.to_uppercase().encode_utf16());
        Ok(())
    }
}

/// Records every write and flush.
#[derive(Default)]
struct Recorder {
    data: Vec<u8>,
    flushed_at: Vec<usize>,
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed_at.push(self.data.len());
        Ok(())
    }
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

async fn collect_lines(input: &[u8], max: usize) -> Result<Vec<Vec<u8>>, RelayError> {
    let mut reader = LineReader::new(input, max);
    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await? {
        lines.push(line.to_vec());
    }
    Ok(lines)
}

#[tokio::test]
async fn test_line_reader_strips_one_newline() {
    let lines = collect_lines(b"/a\n\n/b\r\n/c", 64).await.expect("read");
    assert_eq!(
        lines,
        vec![b"/a".to_vec(), b"".to_vec(), b"/b\r".to_vec(), b"/c".to_vec()]
    );
}

#[tokio::test]
async fn test_line_reader_empty_stream() {
    assert!(collect_lines(b"", 64).await.expect("read").is_empty());
}

#[tokio::test]
async fn test_line_reader_limit() {
    // terminator included in the limit
    let lines = collect_lines(b"1234567\nabc\n", 8).await.expect("fits");
    assert_eq!(lines, vec![b"1234567".to_vec(), b"abc".to_vec()]);

    // unterminated final line of exactly the limit
    let lines = collect_lines(b"12345678", 8).await.expect("fits at eof");
    assert_eq!(lines, vec![b"12345678".to_vec()]);

    let err = collect_lines(b"12345678\n", 8).await.expect_err("too long");
    assert!(matches!(err, RelayError::LineTooLong { limit: 8 }));
}

#[test]
fn test_settings_from_config() {
    let settings = RelaySettings::from_config(&RelayConfig {
        max_line_len: 128,
        input_encoding: EncodingSetting::Acp,
        output_encoding: EncodingSetting::Oem,
    });
    assert_eq!(settings.max_line_len(), 128);
    assert_eq!(settings.input_encoding(), Encoding::Acp);
    assert_eq!(settings.output_encoding(), Encoding::Oem);

    let defaults = RelaySettings::default();
    assert_eq!(defaults.max_line_len(), DEFAULT_MAX_LINE_LEN);
    assert_eq!(defaults.output_encoding(), Encoding::Utf8);
}

#[tokio::test]
async fn test_pump_preserves_order_and_flushes_each_line() {
    let converter = converter();
    let mut out = Recorder::default();
    let stats = Relay::new(&converter, RelaySettings::default())
        .pump(&b"/a/b\n/a/c\n/home/user/project\n"[..], &mut out)
        .await
        .expect("pump");

    assert_eq!(stats.lines, 3);
    insta::assert_snapshot!(String::from_utf8_lossy(&out.data), @r"
    C:\cygwin64\a\b
    C:\cygwin64\a\c
    D:\home\user\project
    ");
    let line_ends: Vec<usize> = out
        .data
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'\n')
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(out.flushed_at, line_ends);
}

#[tokio::test]
async fn test_pump_stops_at_first_failure() {
    let mut out = Recorder::default();
    let err = Relay::new(&FailOnBad, RelaySettings::default())
        .pump(&b"/a\n/bad/path\n/c\n"[..], &mut out)
        .await
        .expect_err("second line fails");

    assert!(matches!(err, RelayError::Convert { ref line, .. } if line == "/bad/path"));
    assert_eq!(out.data, b"/A\n");
}

#[tokio::test]
async fn test_pump_empty_line_fails() {
    let converter = converter();
    let mut out = Recorder::default();
    let err = Relay::new(&converter, RelaySettings::default())
        .pump(&b"/a\n\n/c\n"[..], &mut out)
        .await
        .expect_err("empty line fails");
    assert!(matches!(
        err,
        RelayError::Convert {
            source: ConvertError::Empty,
            ..
        }
    ));
    assert_eq!(out.data, b"C:\\cygwin64\\a\n");
}

#[tokio::test]
async fn test_pump_rejects_malformed_input() {
    let converter = converter();
    let mut out = Recorder::default();
    let err = Relay::new(&converter, RelaySettings::default())
        .pump(&b"/home/ok\n/home/caf\xe9\n/home/later\n"[..], &mut out)
        .await
        .expect_err("latin-1 byte in utf-8 input");

    assert!(matches!(
        err,
        RelayError::Convert {
            ref line,
            source: ConvertError::InvalidEncoding { encoding: "utf8" },
        } if line == "/home/caf\u{FFFD}"
    ));
    assert_eq!(out.data, b"D:\\home\\ok\n");
}

#[tokio::test]
async fn test_pump_write_failure() {
    let converter = converter();
    let err = Relay::new(&converter, RelaySettings::default())
        .pump(&b"/a\n"[..], &mut Broken)
        .await
        .expect_err("broken pipe");
    assert!(matches!(err, RelayError::Write(_)));
}

#[tokio::test]
async fn test_pump_encodings() {
    let converter = converter();
    let settings = RelaySettings::builder()
        .with_input_encoding(Encoding::Acp)
        .with_output_encoding(Encoding::Utf8)
        .build();
    let mut out = Vec::new();
    Relay::new(&converter, settings)
        .pump(&b"/home/caf\xe9\n"[..], &mut out)
        .await
        .expect("pump");
    assert_eq!(String::from_utf8(out).ok().as_deref(), Some("D:\\home\\café\n"));

    let settings = RelaySettings::builder()
        .with_output_encoding(Encoding::Acp)
        .build();
    let mut out = Vec::new();
    let stats = Relay::new(&converter, settings)
        .pump("/home/café/文\n".as_bytes(), &mut out)
        .await
        .expect("pump");
    assert_eq!(out, b"D:\\home\\caf\xe9\\?\n");
    assert_eq!(stats.unmappable, 1);
}

#[test]
fn test_convert_line_reuses_buffers() {
    let converter = converter();
    let mut relay = Relay::new(&converter, RelaySettings::default());
    assert_eq!(
        relay.convert_line(b"/cygdrive/c/a/long/path").expect("convert"),
        b"C:\\a\\long\\path"
    );
    assert_eq!(relay.convert_line(b"/cygdrive/d").expect("convert"), b"D:\\");
}

#[test]
fn test_exit_status_combination() {
    let ok = |child| RewriteOutcome {
        relay: Ok(RelayStats::default()),
        child,
    };
    assert_eq!(ok(ChildExit::Exited(0)).exit_status(), 0);
    assert_eq!(ok(ChildExit::Exited(128)).exit_status(), 128);
    assert_eq!(ok(ChildExit::Abnormal).exit_status(), 1);

    let failed = RewriteOutcome {
        relay: Err(RelayError::LineTooLong { limit: 8 }),
        child: ChildExit::Exited(0),
    };
    assert_eq!(failed.exit_status(), 1);
}

#[cfg(unix)]
mod child {
    use super::*;

    fn script(body: &str) -> ToolCommand {
        ToolCommand::new("/bin/sh").args(["-c", body])
    }

    #[tokio::test]
    async fn test_rewrite_forwards_exit_code() {
        let converter = converter();
        let mut out = Vec::new();
        let outcome = run_rewrite_to(
            script("echo /home/user/project; exit 3"),
            &converter,
            RelaySettings::default(),
            &mut out,
        )
        .await
        .expect("rewrite");

        assert_eq!(out, b"D:\\home\\user\\project\n");
        assert_eq!(outcome.child, ChildExit::Exited(3));
        assert_eq!(outcome.exit_status(), 3);
    }

    #[tokio::test]
    async fn test_rewrite_failure_still_waits() {
        // The child keeps writing long after the relay has given up
        let mut out = Vec::new();
        let outcome = run_rewrite_to(
            script("echo /ok; echo /bad; yes /more | head -n 200000; exit 0"),
            &FailOnBad,
            RelaySettings::default(),
            &mut out,
        )
        .await
        .expect("rewrite");

        assert_eq!(out, b"/OK\n");
        assert!(outcome.relay.is_err());
        assert_eq!(outcome.exit_status(), 1);
    }

    #[tokio::test]
    async fn test_rewrite_abnormal_child() {
        let converter = converter();
        let mut out = Vec::new();
        let outcome = run_rewrite_to(
            script("echo /a; kill -9 $$"),
            &converter,
            RelaySettings::default(),
            &mut out,
        )
        .await
        .expect("rewrite");

        assert_eq!(out, b"C:\\cygwin64\\a\n");
        assert_eq!(outcome.child, ChildExit::Abnormal);
        assert_eq!(outcome.exit_status(), 1);
    }

    #[tokio::test]
    async fn test_rewrite_spawn_failure() {
        let converter = converter();
        let mut out = Vec::new();
        let err = run_rewrite_to(
            ToolCommand::new("/definitely/missing/git"),
            &converter,
            RelaySettings::default(),
            &mut out,
        )
        .await
        .expect_err("missing program");
        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
        assert!(out.is_empty());
    }
}

// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `vscode-git-path` helper.
//!
//! Parses realistic argument lists, then runs the binary against a config
//! file passed with `-c`. `VSCODE_GIT_CONFIG` and `VSCODE_GIT__*` are
//! cleared so nothing outside the test leaks in.

use std::io::Write as _;
use std::process::{Command as Process, Output, Stdio};

use clap::Parser;
use vscode_git_rs::cli::Cli;

struct Helper {
    dir: tempfile::TempDir,
}

impl Helper {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[paths]\nconverter = \"mounts\"\n[relay]\noutput_encoding = \"utf8\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn command(&self, args: &[&str]) -> Process {
        let mut process = Process::new(env!("CARGO_BIN_EXE_vscode-git-path"));
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("VSCODE_GIT__") {
                process.env_remove(key);
            }
        }
        process
            .env_remove("VSCODE_GIT_CONFIG")
            .arg("-c")
            .arg(self.dir.path().join("base.toml"))
            .args(args)
            .stdin(Stdio::null());
        process
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run vscode-git-path")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_paths_with_options() {
    let cli = Cli::try_parse_from([
        "vscode-git-path",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "-l",
        "4",
        "-r",
        "--converter",
        "mounts",
        "/etc",
        "src/main.rs",
    ])
    .unwrap();

    assert_eq!(cli.global.configs.len(), 2);
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.convert.relative);
    assert_eq!(cli.convert.paths, ["/etc", "src/main.rs"]);
}

#[test]
fn cli_rejects_unknown_converter() {
    let result = Cli::try_parse_from(["vscode-git-path", "--converter", "msys"]);
    assert!(result.is_err());
}

#[test]
fn cli_rejects_log_level_out_of_range() {
    let result = Cli::try_parse_from(["vscode-git-path", "-l", "7", "/etc"]);
    assert!(result.is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn helper_converts_arguments() {
    let output = Helper::new().run(&["/etc/gitconfig", "/cygdrive/d/src", "/"]);
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @r"
    C:\cygwin64\etc\gitconfig
    D:\src
    C:\cygwin64\
    ");
}

#[test]
fn helper_converts_stdin() {
    let helper = Helper::new();
    let mut child = helper
        .command(&[])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn vscode-git-path");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin.write_all(b"/usr/bin\n/cygdrive/c/Users\n").expect("write stdin");
    }
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "C:\\cygwin64\\bin\nC:\\Users\n");
}

#[test]
fn helper_keeps_relative_paths_with_flag() {
    let output = Helper::new().run(&["-r", "src/main.rs"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "src\\main.rs\n");
}

#[test]
fn helper_fails_on_empty_path() {
    let output = Helper::new().run(&["/a", "", "/b"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "C:\\cygwin64\\a\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("vscode-git: "), "{stderr}");
    assert!(stderr.contains("empty path"), "{stderr}");
}

#[test]
fn helper_later_config_wins() {
    let helper = Helper::new();
    let extra = helper.dir.path().join("extra.toml");
    std::fs::write(&extra, "[paths]\nroot = 'E:\\cyg'\n").unwrap();

    let output = helper.run(&["-c", extra.to_str().unwrap(), "/etc"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "E:\\cyg\\etc\n");
}

#[test]
fn helper_version() {
    let output = Helper::new().run(&["--version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("vscode-git-path {}\n", env!("CARGO_PKG_VERSION"))
    );
}

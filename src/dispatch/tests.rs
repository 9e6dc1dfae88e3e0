// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::{OsStr, OsString};

use super::{Dispatch, Dispatcher, Invocation};
use crate::config::types::GitConfig;

fn plan(args: &[&str]) -> Dispatch {
    Dispatcher::new(&GitConfig::default()).plan(&Invocation::new(args.iter().copied()))
}

#[test]
fn test_plan() {
    let cases: &[(&[&str], Dispatch)] = &[
        (&["vscode-git"], Dispatch::PassThrough),
        (&["vscode-git", "status"], Dispatch::PassThrough),
        (&["vscode-git", "rev-parse"], Dispatch::Rewrite),
        (&["vscode-git", "rev-parse", "--show-toplevel"], Dispatch::Rewrite),
        (&["vscode-git", "REV-PARSE"], Dispatch::PassThrough),
        (&["vscode-git", "rev-parse "], Dispatch::PassThrough),
        (&["vscode-git", "-C", "/tmp", "rev-parse"], Dispatch::PassThrough),
        (&["vscode-git", ""], Dispatch::PassThrough),
    ];
    for (args, expected) in cases {
        assert_eq!(plan(args), *expected, "{args:?}");
    }
}

#[test]
fn test_custom_intercept() {
    let git = GitConfig {
        intercept: "ls-files".to_string(),
        ..GitConfig::default()
    };
    let dispatcher = Dispatcher::new(&git);
    assert_eq!(
        dispatcher.plan(&Invocation::new(["git", "ls-files"])),
        Dispatch::Rewrite
    );
    assert_eq!(
        dispatcher.plan(&Invocation::new(["git", "rev-parse"])),
        Dispatch::PassThrough
    );
}

#[test]
fn test_forwarded_arguments() {
    let invocation = Invocation::new(["C:\\tools\\vscode-git.exe", "rev-parse", "--git-dir"]);
    assert_eq!(invocation.subcommand(), Some(OsStr::new("rev-parse")));
    assert_eq!(
        invocation.forwarded(),
        &[OsString::from("rev-parse"), OsString::from("--git-dir")]
    );

    let empty = Invocation::new(Vec::<OsString>::new());
    assert!(empty.forwarded().is_empty());
    assert_eq!(empty.subcommand(), None);

    let bare = Invocation::new(["vscode-git"]);
    assert!(bare.forwarded().is_empty());
    assert_eq!(bare.args().len(), 1);
}

#[test]
fn test_command_replaces_argv0() {
    let dispatcher = Dispatcher::new(&GitConfig::default());
    let command = dispatcher.command(&Invocation::new(["vscode-git", "log", "-n", "1"]));
    assert_eq!(command.argv0_name(), Some(OsStr::new("git")));
    insta::assert_snapshot!(command.command_line(), @"/usr/bin/git log -n 1");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_arguments_forwarded() {
    use std::os::unix::ffi::OsStringExt as _;

    let raw = OsString::from_vec(vec![b'f', 0xff, b'o']);
    let invocation = Invocation::new([OsString::from("vscode-git"), OsString::from("add"), raw.clone()]);
    assert_eq!(
        Dispatcher::new(&GitConfig::default()).plan(&invocation),
        Dispatch::PassThrough
    );
    assert_eq!(invocation.forwarded()[1], raw);
}

// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point of `vscode-git`.
//!
//! ```text
//! Config --> Logging --> Dispatcher::plan(argv)
//!   (config error: [git] only, PassThrough or exit 1)
//!   PassThrough: drop log guard, exec git (spawn + wait off Unix)
//!   Rewrite:     converter, relay git's stdout, wait, combine status
//! ```
//!
//! Every argument belongs to git; the wrapper parses none of its own.
//!
//! When the full configuration does not load, only `[git]` is read again and
//! a pass-through invocation still becomes git, without logging. A stray
//! `VSCODE_GIT__*` variable or a bad `[relay]`/`[paths]`/`[log]` value then
//! only breaks the intercepted subcommand. A config file that cannot be read
//! or parsed, or an invalid `[git]`, still fails every invocation with 1.

use std::process::ExitCode;

use vscode_git_rs::config::Config;
use vscode_git_rs::config::loader::ConfigLoader;
use vscode_git_rs::convert;
use vscode_git_rs::core::process::{FAILURE_STATUS, ToolCommand, exit_code};
use vscode_git_rs::dispatch::{Dispatch, Dispatcher, Invocation};
use vscode_git_rs::error::{DIAGNOSTIC_PREFIX, report};
use vscode_git_rs::logging::init_logging;
use vscode_git_rs::relay::{RelaySettings, run_rewrite};

#[cfg(not(target_os = "cygwin"))]
use mimalloc::MiMalloc;

#[cfg(not(target_os = "cygwin"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = Invocation::from_env();

    let config = match ConfigLoader::standard().build() {
        Ok(config) => config,
        Err(e) => return without_config(&invocation, &e),
    };

    let log_guard = match init_logging(&config.log.to_log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{DIAGNOSTIC_PREFIX}: failed to initialize logging: {e:#}");
            return ExitCode::from(FAILURE_STATUS);
        }
    };

    let dispatcher = Dispatcher::new(&config.git);
    let command = match dispatcher.command(&invocation).resolve() {
        Ok(command) => command,
        Err(e) => {
            report(&e);
            return ExitCode::from(FAILURE_STATUS);
        }
    };

    match dispatcher.plan(&invocation) {
        Dispatch::PassThrough => {
            // Buffered log lines do not survive exec
            drop(log_guard);
            pass_through(command)
        }
        Dispatch::Rewrite => rewrite(command, &config).await,
    }
}

fn without_config(invocation: &Invocation, error: &anyhow::Error) -> ExitCode {
    let fail = || {
        eprintln!("{DIAGNOSTIC_PREFIX}: {error:#}");
        ExitCode::from(FAILURE_STATUS)
    };
    let Ok(git) = ConfigLoader::standard().build_git() else {
        return fail();
    };
    let dispatcher = Dispatcher::new(&git);
    if dispatcher.plan(invocation) != Dispatch::PassThrough {
        return fail();
    }
    match dispatcher.command(invocation).resolve() {
        Ok(command) => pass_through(command),
        Err(e) => {
            report(&e);
            ExitCode::from(FAILURE_STATUS)
        }
    }
}

fn pass_through(command: ToolCommand) -> ExitCode {
    match command.pass_through() {
        Ok(exit) => exit.exit_code(),
        Err(e) => {
            report(&e);
            ExitCode::from(FAILURE_STATUS)
        }
    }
}

async fn rewrite(command: ToolCommand, config: &Config) -> ExitCode {
    let converter = match convert::from_config(&config.paths) {
        Ok(converter) => converter,
        Err(e) => {
            report(&e);
            return ExitCode::from(FAILURE_STATUS);
        }
    };
    let settings = RelaySettings::from_config(&config.relay);

    match run_rewrite(command, converter.as_ref(), settings).await {
        Ok(outcome) => exit_code(outcome.exit_status()),
        Err(e) => {
            report(&e);
            ExitCode::from(FAILURE_STATUS)
        }
    }
}

// vscode-git-rs: Cygwin git wrapper for native Windows editors
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point of `vscode-git-path`.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> run_convert_command
//! ```

use std::process::ExitCode;

use vscode_git_rs::cli::{self, Cli};
use vscode_git_rs::cmd::convert::run_convert_command;
use vscode_git_rs::error::{DIAGNOSTIC_PREFIX, Result};
use vscode_git_rs::logging::init_logging;

#[cfg(not(target_os = "cygwin"))]
use mimalloc::MiMalloc;

#[cfg(not(target_os = "cygwin"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{DIAGNOSTIC_PREFIX}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.config_loader()?.build()?;
    let _log_guard = init_logging(&config.log.to_log_config())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_convert_command(&cli.convert, &config, &mut out).await
}

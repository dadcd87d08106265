// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quarry - a capability registry daemon.
//!
//! Binary entry point: loads configuration, bootstraps the catalog, and runs
//! one command against it. Command output goes to stdout, logs to stderr.

mod builtin;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::commands::Command;

/// Quarry - a capability registry daemon.
#[derive(Parser, Debug)]
#[command(name = "quarry", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => quarry_config::load_and_validate_path(path),
        None => quarry_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            quarry_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    commands::init_tracing(&config.daemon.log_level);
    let registry = commands::bootstrap(&config);

    let mut stdout = std::io::stdout().lock();
    match commands::execute(cli.command, &registry, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("quarry: {err}");
            ExitCode::FAILURE
        }
    }
}

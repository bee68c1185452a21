//! # canbuild: canister build orchestrator
//!
//! Compiles the Motoko canisters declared in `mops.toml` or `dfx.json`
//! with `moc`, one canister at a time.
//!
//! Exit codes: `0` success, `1` a canister failed to compile, `2`
//! configuration or usage error, `3` the compiler could not be run.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod commands;
mod output;

use std::process::ExitCode;

use canbuild_common::error::{CanbuildError, ConfigError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;
use crate::commands::build::{BuildFailed, FailureKind};
use crate::output::{RED, RESET};

const EXIT_COMPILER_FAILURE: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_EXECUTION_ERROR: u8 = 3;

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose() { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{RED}Error: {err:#}{RESET}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Maps a command failure to its process exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(failed) = err.downcast_ref::<BuildFailed>() {
        return match failed.kind {
            FailureKind::Compiler => EXIT_COMPILER_FAILURE,
            FailureKind::Execution => EXIT_EXECUTION_ERROR,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_ERROR;
    }
    match err.downcast_ref::<CanbuildError>() {
        Some(CanbuildError::Config(_)) => EXIT_CONFIG_ERROR,
        _ => EXIT_EXECUTION_ERROR,
    }
}

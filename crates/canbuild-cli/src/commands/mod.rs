//! CLI command definitions and dispatch.

pub mod build;

use clap::{Parser, Subcommand};

/// Compile Motoko canisters with moc.
#[derive(Parser, Debug)]
#[command(name = "canbuild", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one or more canisters, or every Motoko canister if none are named.
    Build(build::BuildArgs),
}

impl Cli {
    /// Whether the selected command asked for verbose output.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        match &self.command {
            Command::Build(args) => args.verbose,
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => build::execute(args),
    }
}

//! `canbuild build`: compile canisters declared in mops.toml or dfx.json.

use std::path::PathBuf;

use canbuild_common::config::{BuildOptions, FailurePolicy};
use canbuild_common::types::ConfigFormat;
use canbuild_config::ConfigLoader;
use canbuild_engine::batch::{BatchObserver, BatchReport, BatchRunner};
use canbuild_engine::executor::{BuildOutcome, BuildStatus};
use clap::Args;

use crate::output::{self, BLUE, BOLD, GREEN, RED, RESET, YELLOW};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Canisters to build (default: every Motoko canister).
    pub canisters: Vec<String>,

    /// Directory compiled artifacts are written to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stream compiler output live.
    #[arg(short, long)]
    pub verbose: bool,

    /// Read canisters from dfx.json instead of mops.toml.
    #[arg(long)]
    pub dfx: bool,

    /// Path to the moc binary (default: $DFX_MOC_PATH, then PATH).
    #[arg(long, value_name = "PATH")]
    pub moc: Option<PathBuf>,

    /// Keep building remaining canisters after a failure.
    #[arg(long)]
    pub keep_going: bool,

    /// Extra arguments passed to moc for every canister.
    #[arg(last = true, value_name = "MOC_ARGS")]
    pub extra_args: Vec<String>,
}

impl BuildArgs {
    const fn format(&self) -> ConfigFormat {
        if self.dfx {
            ConfigFormat::Dfx
        } else {
            ConfigFormat::Mops
        }
    }

    fn options(&self) -> BuildOptions {
        BuildOptions {
            output_dir: self.output.clone(),
            verbose: self.verbose,
            extra_args: self.extra_args.clone(),
            failure_policy: if self.keep_going {
                FailurePolicy::ContinueOnError
            } else {
                FailurePolicy::FailFast
            },
        }
    }
}

/// How the batch failed, for exit code selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The compiler rejected a canister.
    Compiler,
    /// The compiler could not be run.
    Execution,
}

/// A batch that did not build every targeted canister.
#[derive(Debug, thiserror::Error)]
#[error("build failed for canister '{canister}' ({failed} of {targeted} canister(s) failed)")]
pub struct BuildFailed {
    /// First canister that failed.
    pub canister: String,
    /// Failure class of that canister.
    pub kind: FailureKind,
    /// Number of failed canisters.
    pub failed: usize,
    /// Number of canisters in the batch.
    pub targeted: usize,
}

impl BuildFailed {
    fn from_report(report: &BatchReport) -> Option<Self> {
        let first = report.failures().next()?;
        let kind = match first.status {
            BuildStatus::ExecutionError(_) => FailureKind::Execution,
            _ => FailureKind::Compiler,
        };
        Some(Self {
            canister: first.canister_name.clone(),
            kind,
            failed: report.failures().count(),
            targeted: report.targeted,
        })
    }
}

/// Prints one status line per canister as the batch runs.
///
/// Progress goes to stdout, failure diagnostics to stderr.
struct ProgressPrinter {
    verbose: bool,
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
impl BatchObserver for ProgressPrinter {
    fn canister_started(&self, name: &str) {
        println!("{BLUE}build canister{RESET} {BOLD}{name}{RESET}");
    }

    fn canister_finished(&self, outcome: &BuildOutcome) {
        let name = &outcome.canister_name;
        match &outcome.status {
            BuildStatus::Success => {
                if self.verbose {
                    println!(
                        "build canister {name}: {}",
                        output::format_duration(outcome.duration)
                    );
                }
            }
            BuildStatus::CompilerFailure { .. } => {
                eprintln!("{RED}Error: Failed to build canister {name}{RESET}");
                if let Some(stderr) = outcome.stderr.as_deref().filter(|s| !s.is_empty()) {
                    eprintln!("{RED}{}{RESET}", stderr.trim_end());
                }
                if let Some(stdout) = outcome.stdout.as_deref().filter(|s| !s.trim().is_empty()) {
                    eprintln!("{YELLOW}Build output:{RESET}");
                    eprintln!("{}", stdout.trim_end());
                }
            }
            BuildStatus::ExecutionError(err) => {
                eprintln!("{RED}Error while compiling canister {name}{RESET}");
                eprintln!("{RED}Details: {err}{RESET}");
            }
        }
    }
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the output directory
/// cannot be created, or any canister fails to build.
#[allow(clippy::print_stdout)]
pub fn execute(args: BuildArgs) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let loader = ConfigLoader::new(&root, args.format());
    tracing::info!(config = %loader.path().display(), "building canisters");

    let config = loader.load()?;
    let runner = BatchRunner::for_project(&root, args.moc.clone())?;
    let requested = (!args.canisters.is_empty()).then_some(args.canisters.as_slice());
    let options = args.options();

    let report = runner.run_observed(
        &config,
        requested,
        &options,
        &ProgressPrinter {
            verbose: args.verbose,
        },
    )?;

    if let Some(failed) = BuildFailed::from_report(&report) {
        return Err(failed.into());
    }

    println!(
        "\n{GREEN}✓ Built {} canister{}{RESET}",
        report.succeeded(),
        if report.succeeded() == 1 { "" } else { "s" }
    );
    Ok(())
}

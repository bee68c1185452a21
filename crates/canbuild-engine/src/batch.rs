//! Batch runner that drives resolution, invocation, and execution.
//!
//! Canisters build strictly one after another in resolved order. Every
//! configuration problem is raised before the first compiler starts.

use std::path::{Path, PathBuf};

use canbuild_common::config::{BuildOptions, FailurePolicy};
use canbuild_common::error::{CanbuildError, LaunchError, Result};
use canbuild_common::types::ProjectConfig;
use canbuild_config::sources::PackageSources;

use crate::executor::{BuildExecutor, BuildOutcome, BuildStatus, ProcessExecutor};
use crate::invocation::build_invocation;
use crate::locator::{CompilerLocator, SystemCompilerLocator};
use crate::resolver;

/// Supplies package search-path arguments for every invocation.
pub trait SourcePathProvider: Send + Sync {
    /// Returns the opaque search-path arguments, in order.
    fn source_args(&self) -> Vec<String>;
}

impl SourcePathProvider for PackageSources {
    fn source_args(&self) -> Vec<String> {
        self.args()
    }
}

impl SourcePathProvider for Vec<String> {
    fn source_args(&self) -> Vec<String> {
        self.clone()
    }
}

/// Receives progress notifications while a batch runs.
pub trait BatchObserver {
    /// Called before a canister's compiler is launched.
    fn canister_started(&self, _name: &str) {}

    /// Called after a canister's build finished.
    fn canister_finished(&self, _outcome: &BuildOutcome) {}
}

struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// Summary of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Directory artifacts were written to.
    pub output_dir: PathBuf,
    /// Number of canisters selected for the batch.
    pub targeted: usize,
    /// Outcomes of every attempted canister, in build order.
    pub outcomes: Vec<BuildOutcome>,
}

impl BatchReport {
    /// Number of canisters whose compiler was attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of canisters built successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Failed outcomes, in build order.
    pub fn failures(&self) -> impl Iterator<Item = &BuildOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of targeted canisters never attempted.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.targeted.saturating_sub(self.outcomes.len())
    }

    /// Whether every targeted canister was built.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.skipped() == 0 && self.outcomes.iter().all(BuildOutcome::is_success)
    }
}

/// Sequential canister builder with injected collaborators.
pub struct BatchRunner {
    locator: Box<dyn CompilerLocator>,
    sources: Box<dyn SourcePathProvider>,
    executor: Box<dyn BuildExecutor>,
}

impl BatchRunner {
    /// Creates a runner from explicit collaborators.
    #[must_use]
    pub fn new(
        locator: Box<dyn CompilerLocator>,
        sources: Box<dyn SourcePathProvider>,
        executor: Box<dyn BuildExecutor>,
    ) -> Self {
        Self {
            locator,
            sources,
            executor,
        }
    }

    /// Creates a runner that locates `moc` on this host, reads package
    /// sources from the project at `root`, and spawns real processes.
    ///
    /// # Errors
    ///
    /// Returns an error if the project's `mops.toml` exists but is invalid.
    pub fn for_project(root: &Path, compiler: Option<PathBuf>) -> Result<Self> {
        let sources = PackageSources::from_project(root)?;
        Ok(Self::new(
            Box::new(SystemCompilerLocator::from_env(compiler)),
            Box::new(sources),
            Box::new(ProcessExecutor),
        ))
    }

    /// Builds the selected canisters of `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from resolution, or an I/O error if
    /// the output directory cannot be created. Compiler failures are not
    /// errors; they are recorded in the returned report.
    pub fn run(
        &self,
        config: &ProjectConfig,
        requested: Option<&[String]>,
        options: &BuildOptions,
    ) -> Result<BatchReport> {
        self.run_observed(config, requested, options, &SilentObserver)
    }

    /// Like [`BatchRunner::run`], reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// See [`BatchRunner::run`].
    pub fn run_observed(
        &self,
        config: &ProjectConfig,
        requested: Option<&[String]>,
        options: &BuildOptions,
        observer: &dyn BatchObserver,
    ) -> Result<BatchReport> {
        let targets = resolver::resolve(config, requested)?;
        let output_dir = options.effective_output_dir(config.output_dir.as_deref());
        prepare_output_dir(&output_dir)?;

        tracing::info!(
            canisters = targets.len(),
            output_dir = %output_dir.display(),
            policy = ?options.failure_policy,
            "starting build batch"
        );

        let compiler = self.locator.locate();
        let source_args = self.sources.source_args();
        let mut outcomes = Vec::with_capacity(targets.len());

        for canister in &targets {
            observer.canister_started(&canister.name);
            let outcome = match &compiler {
                Ok(program) => {
                    let task = build_invocation(
                        program,
                        canister,
                        &output_dir,
                        &config.build_args,
                        &options.extra_args,
                        &source_args,
                    );
                    tracing::debug!(canister = %canister.name, argv = ?task.argv, "invoking compiler");
                    self.executor.execute(&task, options.verbose)
                }
                Err(e) => BuildOutcome::launch_failure(&canister.name, LaunchError::from(e.clone())),
            };
            observer.canister_finished(&outcome);

            let failed = !outcome.is_success();
            log_outcome(&outcome);
            outcomes.push(outcome);

            if failed && options.failure_policy == FailurePolicy::FailFast {
                tracing::warn!(
                    canister = %canister.name,
                    skipped = targets.len() - outcomes.len(),
                    "stopping batch after failure"
                );
                break;
            }
        }

        Ok(BatchReport {
            output_dir,
            targeted: targets.len(),
            outcomes,
        })
    }
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| CanbuildError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn log_outcome(outcome: &BuildOutcome) {
    match &outcome.status {
        BuildStatus::Success => tracing::info!(
            canister = %outcome.canister_name,
            elapsed_ms = outcome.duration.as_millis(),
            "canister built"
        ),
        BuildStatus::CompilerFailure { exit_code } => tracing::warn!(
            canister = %outcome.canister_name,
            exit_code = ?exit_code,
            "canister failed to compile"
        ),
        BuildStatus::ExecutionError(err) => tracing::warn!(
            canister = %outcome.canister_name,
            error = %err,
            "compiler could not be run"
        ),
    }
}

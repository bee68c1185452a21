//! Compiler process execution.
//!
//! A non-zero compiler exit is an ordinary outcome, not an error: the
//! executor always returns a [`BuildOutcome`] and never retries.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use canbuild_common::error::LaunchError;

use crate::invocation::BuildTask;

/// Classification of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The compiler exited with status zero.
    Success,
    /// The compiler ran and reported failure.
    ///
    /// `exit_code` is `None` when the process was terminated by a signal.
    CompilerFailure {
        /// Process exit code.
        exit_code: Option<i32>,
    },
    /// The compiler could not be started.
    ExecutionError(LaunchError),
}

/// Result of building one canister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Canister that was built.
    pub canister_name: String,
    /// How the build ended.
    pub status: BuildStatus,
    /// Captured standard output (failed, non-verbose builds only).
    pub stdout: Option<String>,
    /// Captured standard error (failed, non-verbose builds only).
    pub stderr: Option<String>,
    /// Wall-clock time spent on the build.
    pub duration: Duration,
}

impl BuildOutcome {
    /// Outcome of a build that could not start.
    #[must_use]
    pub fn launch_failure(canister_name: impl Into<String>, error: LaunchError) -> Self {
        Self {
            canister_name: canister_name.into(),
            status: BuildStatus::ExecutionError(error),
            stdout: None,
            stderr: None,
            duration: Duration::ZERO,
        }
    }

    /// Whether the canister was built.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, BuildStatus::Success)
    }

    /// Exit code of a compiler failure.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self.status {
            BuildStatus::CompilerFailure { exit_code } => exit_code,
            _ => None,
        }
    }
}

/// Runs one compiler invocation.
pub trait BuildExecutor: Send + Sync {
    /// Executes `task`, streaming output when `verbose` and capturing it otherwise.
    fn execute(&self, task: &BuildTask, verbose: bool) -> BuildOutcome;
}

/// Executor that spawns the compiler as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl BuildExecutor for ProcessExecutor {
    fn execute(&self, task: &BuildTask, verbose: bool) -> BuildOutcome {
        let start = Instant::now();
        let mut command = Command::new(&task.program);
        let _ = command.args(&task.argv).stdin(Stdio::null());

        let result = if verbose {
            command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map(|status| (status, None))
        } else {
            command.output().map(|output| {
                let captured = (
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                );
                (output.status, Some(captured))
            })
        };

        let (status, captured) = match result {
            Ok(done) => done,
            Err(e) => {
                let error = LaunchError::from_io(task.program.clone(), &e);
                tracing::warn!(canister = %task.canister_name, error = %error, "compiler failed to launch");
                return BuildOutcome::launch_failure(&task.canister_name, error);
            }
        };
        let duration = start.elapsed();

        if status.success() {
            tracing::debug!(canister = %task.canister_name, elapsed_ms = duration.as_millis(), "compiler succeeded");
            return BuildOutcome {
                canister_name: task.canister_name.clone(),
                status: BuildStatus::Success,
                stdout: None,
                stderr: None,
                duration,
            };
        }

        tracing::warn!(canister = %task.canister_name, code = ?status.code(), "compiler reported failure");
        let (stdout, stderr) = captured.map_or((None, None), |(out, err)| (Some(out), Some(err)));
        BuildOutcome {
            canister_name: task.canister_name.clone(),
            status: BuildStatus::CompilerFailure {
                exit_code: status.code(),
            },
            stdout,
            stderr,
            duration,
        }
    }
}

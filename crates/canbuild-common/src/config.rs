//! Per-invocation build options.

use std::path::{Path, PathBuf};

/// What the batch runner does after a canister fails to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and skip every remaining canister.
    #[default]
    FailFast,
    /// Build every canister and report all failures at the end.
    ContinueOnError,
}

/// Options controlling a single batch build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Output directory requested on the command line.
    pub output_dir: Option<PathBuf>,
    /// Stream compiler output live instead of capturing it.
    pub verbose: bool,
    /// Extra compiler arguments given on the command line.
    pub extra_args: Vec<String>,
    /// Behavior after a failed canister.
    pub failure_policy: FailurePolicy,
}

impl BuildOptions {
    /// Picks the output directory: command line, then project config, then the default.
    #[must_use]
    pub fn effective_output_dir(&self, project_output_dir: Option<&Path>) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| project_output_dir.map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(crate::constants::DEFAULT_BUILD_OUTPUT_DIR))
    }
}

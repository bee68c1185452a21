//! Unified error types for the canbuild workspace.
//!
//! Configuration problems are Rust errors and abort a batch before any
//! compiler runs. Compiler failures are not errors at all: they are
//! build outcomes reported by the engine. [`LaunchError`] describes why the
//! compiler could not be started and travels inside such an outcome.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigFormat;

/// Scope an `args` field was declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsScope {
    /// Project-level `[build] args`.
    Project,
    /// A canister's own `args`.
    Canister(String),
}

impl fmt::Display for ArgsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("[build] config 'args'"),
            Self::Canister(name) => write!(f, "canister '{name}' config 'args'"),
        }
    }
}

/// Malformed or missing project configuration, or an invalid target selection.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The caller explicitly asked for zero canisters.
    #[error("no canisters specified to build")]
    EmptyTargetList,

    /// The configuration source declares no canisters at all.
    #[error("no Motoko canisters found in {format} configuration")]
    NoCanisters {
        /// Configuration source.
        format: ConfigFormat,
    },

    /// A requested canister is not declared.
    #[error("Motoko canister '{name}' not found in {format} configuration")]
    UnknownCanister {
        /// Requested name.
        name: String,
        /// Configuration source.
        format: ConfigFormat,
    },

    /// Filtering left nothing to build.
    #[error("no valid canister names specified")]
    NoValidTargets,

    /// A buildable canister has no entry point.
    #[error("no main file is specified for canister '{name}'")]
    MissingEntryPoint {
        /// Canister name.
        name: String,
    },

    /// An `args` field is not an array of strings.
    #[error("{scope} should be an array of strings in {format}")]
    InvalidArgsType {
        /// Where the field was declared.
        scope: ArgsScope,
        /// Configuration source.
        format: ConfigFormat,
    },

    /// The configuration file is not valid for its format.
    #[error("failed to parse {format}: {source}")]
    Parse {
        /// Configuration source.
        format: ConfigFormat,
        /// Underlying parser error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// The compiler binary could not be located on this host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// Nothing usable was found.
    #[error("compiler '{binary}' not found (set {env_var} or add it to PATH)")]
    CompilerNotFound {
        /// Binary name that was searched for.
        binary: String,
        /// Environment variable that would have overridden the search.
        env_var: String,
    },
}

/// Why the compiler process could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// The compiler could not be located before launch.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The binary does not exist at the resolved path.
    #[error("compiler binary not found at {}", program.display())]
    NotFound {
        /// Resolved compiler path.
        program: PathBuf,
    },

    /// The binary exists but may not be executed.
    #[error("permission denied executing {}", program.display())]
    PermissionDenied {
        /// Resolved compiler path.
        program: PathBuf,
    },

    /// Any other spawn failure.
    #[error("failed to launch {}: {message}", program.display())]
    Other {
        /// Resolved compiler path.
        program: PathBuf,
        /// Operating system diagnostic.
        message: String,
    },
}

impl LaunchError {
    /// Classifies a spawn failure for `program`.
    #[must_use]
    pub fn from_io(program: PathBuf, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { program },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { program },
            _ => Self::Other {
                program,
                message: err.to_string(),
            },
        }
    }

    /// Whether the failure means the compiler binary is missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Locate(_))
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum CanbuildError {
    /// Configuration or target selection is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A filesystem operation outside configuration loading failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CanbuildError>;

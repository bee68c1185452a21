//! Compiler binary discovery.

use std::path::PathBuf;

use canbuild_common::constants::{COMPILER_BIN, COMPILER_PATH_ENV};
use canbuild_common::error::LocateError;

/// Finds the compiler binary to invoke.
pub trait CompilerLocator: Send + Sync {
    /// Returns the compiler path.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::CompilerNotFound`] if no binary is discoverable.
    fn locate(&self) -> Result<PathBuf, LocateError>;
}

/// Looks for the compiler the way a developer machine is set up.
///
/// Precedence: an explicit path, then the `DFX_MOC_PATH` environment
/// variable, then `moc` on `PATH`. Explicit and environment paths are
/// returned unchecked; a bad path surfaces when the executor launches it.
#[derive(Debug, Clone, Default)]
pub struct SystemCompilerLocator {
    explicit: Option<PathBuf>,
    env_override: Option<PathBuf>,
}

impl SystemCompilerLocator {
    /// Creates a locator from an explicit path and an environment override.
    #[must_use]
    pub const fn new(explicit: Option<PathBuf>, env_override: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env_override,
        }
    }

    /// Creates a locator that reads `DFX_MOC_PATH` from the process environment.
    #[must_use]
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let env_override = std::env::var_os(COMPILER_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(explicit, env_override)
    }
}

impl CompilerLocator for SystemCompilerLocator {
    fn locate(&self) -> Result<PathBuf, LocateError> {
        if let Some(path) = self.explicit.as_ref().or(self.env_override.as_ref()) {
            tracing::debug!(path = %path.display(), "using configured compiler path");
            return Ok(path.clone());
        }
        which::which(COMPILER_BIN).map_err(|_| LocateError::CompilerNotFound {
            binary: COMPILER_BIN.to_owned(),
            env_var: COMPILER_PATH_ENV.to_owned(),
        })
    }
}

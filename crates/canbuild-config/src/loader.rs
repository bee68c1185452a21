//! Reads a project configuration file off disk.

use std::path::{Path, PathBuf};

use canbuild_common::error::ConfigError;
use canbuild_common::types::{ConfigFormat, ProjectConfig};

/// Loads the configuration of one project in one format.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    format: ConfigFormat,
}

impl ConfigLoader {
    /// Creates a loader for the project rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, format: ConfigFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    /// Path of the configuration file this loader reads.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root.join(self.format.file_name())
    }

    /// Reads and normalizes the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any
    /// parse/validation error of the selected format.
    pub fn load(&self) -> Result<ProjectConfig, ConfigError> {
        let path = self.path();
        tracing::debug!(path = %path.display(), format = %self.format, "reading project config");
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        match self.format {
            ConfigFormat::Mops => crate::mops::parse(&content),
            ConfigFormat::Dfx => crate::dfx::parse(&content),
        }
    }
}

/// Loads the project configuration of `format` from `root`.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
pub fn load_project_config(format: ConfigFormat, root: &Path) -> Result<ProjectConfig, ConfigError> {
    ConfigLoader::new(root, format).load()
}

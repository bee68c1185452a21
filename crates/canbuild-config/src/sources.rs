//! Compiler search-path arguments for declared dependencies.
//!
//! Each `[dependencies]` entry of `mops.toml` becomes one
//! `--package <name> <dir>` triple. Packages are assumed to be installed
//! already; nothing here fetches or resolves versions.

use std::path::{Path, PathBuf};

use canbuild_common::constants::{DEFAULT_PACKAGE_BASE_DIR, MOPS_CONFIG_FILE, PACKAGES_DIR};
use canbuild_common::error::ConfigError;
use canbuild_common::types::ConfigFormat;
use serde::Deserialize;

/// Where a dependency's sources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageLocation {
    /// Registry package installed under the package cache.
    Version(String),
    /// Git package installed under the package cache.
    Repo(String),
    /// Local directory.
    Path(PathBuf),
}

/// One declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    /// Package name as declared.
    pub name: String,
    /// Source location.
    pub location: PackageLocation,
}

impl PackageSource {
    /// Directory passed to the compiler for this package.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        let package_dir = match &self.location {
            PackageLocation::Version(version) => {
                Path::new(PACKAGES_DIR).join(format!("{}@{version}", self.name))
            }
            PackageLocation::Repo(url) => {
                let dir = url
                    .split_once('#')
                    .map_or_else(|| self.name.clone(), |(_, git_ref)| format!("{}#{git_ref}", self.name));
                Path::new(PACKAGES_DIR).join("_github").join(dir)
            }
            PackageLocation::Path(path) => path.clone(),
        };
        package_dir.join(DEFAULT_PACKAGE_BASE_DIR)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependencyEntry {
    Spec(String),
    Table {
        version: Option<String>,
        repo: Option<String>,
        path: Option<String>,
    },
}

fn classify(spec: String) -> PackageLocation {
    if spec.starts_with("https://github.com") || spec.starts_with("git@") {
        PackageLocation::Repo(spec)
    } else if spec.starts_with("./") || spec.starts_with("../") || spec.starts_with('/') {
        PackageLocation::Path(PathBuf::from(spec))
    } else {
        PackageLocation::Version(spec)
    }
}

/// Dependencies of a project, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSources {
    packages: Vec<PackageSource>,
}

impl PackageSources {
    /// Reads `[dependencies]` from the project's `mops.toml`.
    ///
    /// A project without `mops.toml` has no packages.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_project(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(MOPS_CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no mops.toml, no package sources");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses `[dependencies]` from `mops.toml` content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML or an unrecognized entry.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file = crate::mops::parse_file(content)?;
        let mut packages = Vec::with_capacity(file.dependencies.len());
        for (name, value) in file.dependencies {
            let entry: DependencyEntry = value.try_into().map_err(|e| ConfigError::Parse {
                format: ConfigFormat::Mops,
                source: Box::new(e),
            })?;
            let location = match entry {
                DependencyEntry::Spec(spec) => classify(spec),
                DependencyEntry::Table {
                    path: Some(path), ..
                } => PackageLocation::Path(PathBuf::from(path)),
                DependencyEntry::Table {
                    repo: Some(repo), ..
                } => PackageLocation::Repo(repo),
                DependencyEntry::Table {
                    version: Some(version),
                    ..
                } => PackageLocation::Version(version),
                DependencyEntry::Table { .. } => {
                    return Err(ConfigError::Parse {
                        format: ConfigFormat::Mops,
                        source: format!("dependency '{name}' needs a version, repo or path").into(),
                    });
                }
            };
            packages.push(PackageSource { name, location });
        }
        Ok(Self { packages })
    }

    /// Declared packages.
    #[must_use]
    pub fn packages(&self) -> &[PackageSource] {
        &self.packages
    }

    /// Flattened `--package <name> <dir>` arguments.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.packages
            .iter()
            .flat_map(|p| {
                [
                    "--package".to_owned(),
                    p.name.clone(),
                    p.source_dir().to_string_lossy().into_owned(),
                ]
            })
            .collect()
    }
}

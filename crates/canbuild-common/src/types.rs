//! Project model shared by the config adapter and the build engine.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANISTER_KIND, DFX_CONFIG_FILE, MOPS_CONFIG_FILE};

/// Source format a [`ProjectConfig`] was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// `mops.toml`.
    Mops,
    /// `dfx.json`.
    Dfx,
}

impl ConfigFormat {
    /// Returns the file name this format is read from.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Mops => MOPS_CONFIG_FILE,
            Self::Dfx => DFX_CONFIG_FILE,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Toolchain a canister is built with.
///
/// Only [`CanisterKind::Motoko`] is buildable here; every other tag belongs
/// to a different toolchain and is skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CanisterKind {
    /// The default toolchain (`moc`).
    #[default]
    Motoko,
    /// Any other canister type tag (`rust`, `assets`, `custom`, ...).
    Other(String),
}

impl CanisterKind {
    /// Maps an optional `type` tag to a kind. A missing tag is the default.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => Self::Motoko,
            Some(t) => Self::from(t.to_owned()),
        }
    }

    /// Whether this is the toolchain the pipeline builds.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Motoko)
    }
}

impl From<String> for CanisterKind {
    fn from(tag: String) -> Self {
        if tag == DEFAULT_CANISTER_KIND {
            Self::Motoko
        } else {
            Self::Other(tag)
        }
    }
}

impl From<CanisterKind> for String {
    fn from(kind: CanisterKind) -> Self {
        match kind {
            CanisterKind::Motoko => DEFAULT_CANISTER_KIND.to_owned(),
            CanisterKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for CanisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motoko => f.write_str(DEFAULT_CANISTER_KIND),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

/// One build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanisterSpec {
    /// Unique key within the project.
    pub name: String,
    /// Toolchain tag.
    pub kind: CanisterKind,
    /// Entry source file. Required for buildable kinds.
    pub main_path: Option<String>,
    /// Extra compiler arguments scoped to this canister.
    pub extra_args: Vec<String>,
}

impl CanisterSpec {
    /// Creates a canister of the given kind with no entry point or arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CanisterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            main_path: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates a default-toolchain canister with the given entry point.
    #[must_use]
    pub fn motoko(name: impl Into<String>, main_path: impl Into<String>) -> Self {
        Self::new(name, CanisterKind::Motoko).with_main(main_path)
    }

    /// Sets the entry source file.
    #[must_use]
    pub fn with_main(mut self, main_path: impl Into<String>) -> Self {
        self.main_path = Some(main_path.into());
        self
    }

    /// Sets the canister-level compiler arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the entry point if one is declared and non-blank.
    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        self.main_path
            .as_deref()
            .filter(|main| !main.trim().is_empty())
    }
}

/// Normalized view over either project configuration source.
///
/// Canisters keep the insertion order of the source file and names are
/// unique: [`ProjectConfig::with_canister`] replaces an existing entry in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Format the configuration was read from.
    pub format: ConfigFormat,
    /// Canisters in source order.
    pub canisters: Vec<CanisterSpec>,
    /// Extra compiler arguments applied to every canister.
    pub build_args: Vec<String>,
    /// Project-level output directory override.
    pub output_dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Creates an empty configuration for the given format.
    #[must_use]
    pub const fn new(format: ConfigFormat) -> Self {
        Self {
            format,
            canisters: Vec::new(),
            build_args: Vec::new(),
            output_dir: None,
        }
    }

    /// Adds a canister, replacing any existing canister with the same name.
    #[must_use]
    pub fn with_canister(mut self, spec: CanisterSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Sets the project-level compiler arguments.
    #[must_use]
    pub fn with_build_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Inserts a canister, keeping the position of a replaced entry.
    pub fn insert(&mut self, spec: CanisterSpec) {
        if let Some(existing) = self.canisters.iter_mut().find(|c| c.name == spec.name) {
            *existing = spec;
        } else {
            self.canisters.push(spec);
        }
    }

    /// Looks up a canister by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CanisterSpec> {
        self.canisters.iter().find(|c| c.name == name)
    }

    /// Canister names in source order.
    pub fn canister_names(&self) -> impl Iterator<Item = &str> {
        self.canisters.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tag_is_default_kind() {
        assert_eq!(CanisterKind::from_tag(None), CanisterKind::Motoko);
        assert_eq!(CanisterKind::from_tag(Some("motoko")), CanisterKind::Motoko);
        assert_eq!(
            CanisterKind::from_tag(Some("rust")),
            CanisterKind::Other("rust".into())
        );
    }

    #[test]
    fn kind_deserializes_from_tag() {
        let kind: CanisterKind = serde_json::from_str("\"assets\"").unwrap();
        assert!(!kind.is_default());
        assert_eq!(kind.to_string(), "assets");
    }

    #[test]
    fn blank_main_is_not_an_entry_point() {
        let spec = CanisterSpec::motoko("app", "   ");
        assert_eq!(spec.entry_point(), None);
        assert_eq!(CanisterSpec::new("app", CanisterKind::Motoko).entry_point(), None);
        assert_eq!(
            CanisterSpec::motoko("app", "src/main.mo").entry_point(),
            Some("src/main.mo")
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let config = ProjectConfig::new(ConfigFormat::Mops)
            .with_canister(CanisterSpec::motoko("a", "a.mo"))
            .with_canister(CanisterSpec::motoko("b", "b.mo"))
            .with_canister(CanisterSpec::motoko("a", "other.mo"));

        let names: Vec<_> = config.canister_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            config.get("a").and_then(CanisterSpec::entry_point),
            Some("other.mo")
        );
    }

    #[test]
    fn format_displays_file_name() {
        assert_eq!(ConfigFormat::Mops.to_string(), "mops.toml");
        assert_eq!(ConfigFormat::Dfx.to_string(), "dfx.json");
    }
}

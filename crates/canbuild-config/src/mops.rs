//! `mops.toml` loader.
//!
//! A canister entry is either a bare string (the entry path) or a table
//! with `main` and optional `args`. Both shapes normalize to the same
//! [`CanisterSpec`]; every mops canister uses the default toolchain.

use std::path::PathBuf;

use canbuild_common::error::{ArgsScope, ConfigError};
use canbuild_common::types::{CanisterKind, CanisterSpec, ConfigFormat, ProjectConfig};
use serde::Deserialize;

use crate::args::ArgsField;

const FORMAT: ConfigFormat = ConfigFormat::Mops;

/// Raw `mops.toml` contents relevant to building.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MopsFile {
    #[serde(default)]
    canisters: toml::Table,
    #[serde(default)]
    build: Option<BuildSection>,
    #[serde(default)]
    pub(crate) dependencies: toml::Table,
}

#[derive(Debug, Deserialize)]
struct BuildSection {
    #[serde(rename = "outputDir")]
    output_dir: Option<String>,
    args: Option<ArgsField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CanisterEntry {
    Main(String),
    Table {
        main: Option<String>,
        args: Option<ArgsField>,
    },
}

pub(crate) fn parse_file(content: &str) -> Result<MopsFile, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        format: FORMAT,
        source: Box::new(e),
    })
}

/// Parses `mops.toml` content into a normalized project configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for invalid TOML or an unrecognized
/// canister entry, and [`ConfigError::InvalidArgsType`] when an `args`
/// field is not an array of strings.
pub fn parse(content: &str) -> Result<ProjectConfig, ConfigError> {
    normalize(parse_file(content)?)
}

fn normalize(file: MopsFile) -> Result<ProjectConfig, ConfigError> {
    let mut config = ProjectConfig::new(FORMAT);

    if let Some(build) = file.build {
        config.output_dir = build.output_dir.map(PathBuf::from);
        config.build_args = ArgsField::into_args(build.args, ArgsScope::Project, FORMAT)?;
    }

    for (name, value) in file.canisters {
        let entry: CanisterEntry = value.try_into().map_err(|e| ConfigError::Parse {
            format: FORMAT,
            source: Box::new(e),
        })?;
        let spec = match entry {
            CanisterEntry::Main(main) => CanisterSpec::motoko(name, main),
            CanisterEntry::Table { main, args } => {
                let extra_args =
                    ArgsField::into_args(args, ArgsScope::Canister(name.clone()), FORMAT)?;
                CanisterSpec {
                    name,
                    kind: CanisterKind::Motoko,
                    main_path: main,
                    extra_args,
                }
            }
        };
        config.insert(spec);
    }

    tracing::debug!(
        canisters = config.canisters.len(),
        build_args = config.build_args.len(),
        "loaded mops.toml"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_table_entries_normalize_alike() {
        let config = parse(
            r#"
[canisters]
backend = "src/backend/main.mo"
frontend = { main = "src/frontend/main.mo", args = ["--public-metadata", "candid:service"] }
"#,
        )
        .unwrap();

        assert_eq!(config.format, ConfigFormat::Mops);
        assert_eq!(
            config.canisters,
            vec![
                CanisterSpec::motoko("backend", "src/backend/main.mo"),
                CanisterSpec::motoko("frontend", "src/frontend/main.mo")
                    .with_args(["--public-metadata", "candid:service"]),
            ]
        );
    }

    #[test]
    fn canister_order_follows_source() {
        let config = parse(
            r#"
[canisters]
zeta = "z.mo"
alpha = "a.mo"
mid = "m.mo"
"#,
        )
        .unwrap();
        let names: Vec<_> = config.canister_names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn build_section_is_read() {
        let config = parse(
            r#"
[build]
outputDir = "target/wasm"
args = ["--incremental-gc"]

[canisters]
app = "main.mo"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("target/wasm")));
        assert_eq!(config.build_args, ["--incremental-gc"]);
    }

    #[test]
    fn table_without_main_is_kept_for_resolution() {
        let config = parse(
            r#"
[canisters.app]
args = ["-v"]
"#,
        )
        .unwrap();
        assert_eq!(config.get("app").and_then(|c| c.main_path.clone()), None);
    }

    #[test]
    fn string_build_args_are_rejected() {
        let err = parse(
            r#"
[build]
args = "--incremental-gc"

[canisters]
app = "main.mo"
"#,
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::InvalidArgsType {
                    scope: ArgsScope::Project,
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn string_canister_args_name_the_canister() {
        let err = parse(
            r#"
[canisters.app]
main = "main.mo"
args = "--release"
"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("canister 'app'"), "got: {msg}");
    }

    #[test]
    fn missing_canisters_section_yields_empty_project() {
        let config = parse("[package]\nname = \"lib\"\n").unwrap();
        assert!(config.canisters.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = parse("[canisters\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

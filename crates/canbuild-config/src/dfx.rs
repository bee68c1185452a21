//! `dfx.json` loader.
//!
//! Every canister carries an optional `type` tag; untagged canisters use
//! the default toolchain. The format has no project-level build arguments
//! or output directory, so those stay empty.

use canbuild_common::error::{ArgsScope, ConfigError};
use canbuild_common::types::{CanisterKind, CanisterSpec, ConfigFormat, ProjectConfig};
use serde::Deserialize;

use crate::args::ArgsField;

const FORMAT: ConfigFormat = ConfigFormat::Dfx;

#[derive(Debug, Deserialize)]
struct DfxFile {
    #[serde(default)]
    canisters: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DfxCanister {
    #[serde(rename = "type")]
    kind: Option<String>,
    main: Option<String>,
    args: Option<ArgsField>,
}

/// Parses `dfx.json` content into a normalized project configuration.
///
/// Canisters of every type are kept; the resolver decides which ones
/// to build.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for invalid JSON or a non-object canister
/// entry, and [`ConfigError::InvalidArgsType`] when a canister's `args`
/// is not an array of strings.
pub fn parse(content: &str) -> Result<ProjectConfig, ConfigError> {
    let file: DfxFile = serde_json::from_str(content).map_err(parse_error)?;
    let mut config = ProjectConfig::new(FORMAT);

    for (name, value) in file.canisters {
        let raw: DfxCanister = serde_json::from_value(value).map_err(parse_error)?;
        let kind = CanisterKind::from_tag(raw.kind.as_deref());
        // Args of other toolchains are not ours to validate.
        let extra_args = if kind.is_default() {
            ArgsField::into_args(raw.args, ArgsScope::Canister(name.clone()), FORMAT)?
        } else {
            Vec::new()
        };
        config.insert(CanisterSpec {
            name,
            kind,
            main_path: raw.main,
            extra_args,
        });
    }

    tracing::debug!(canisters = config.canisters.len(), "loaded dfx.json");
    Ok(config)
}

fn parse_error(e: serde_json::Error) -> ConfigError {
    ConfigError::Parse {
        format: FORMAT,
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_kind_in_source_order() {
        let config = parse(
            r#"{
  "canisters": {
    "web": { "type": "assets", "source": ["dist"] },
    "backend": { "type": "motoko", "main": "src/backend/main.mo" },
    "ledger": { "type": "custom", "wasm": "ledger.wasm" },
    "worker": { "main": "src/worker.mo", "args": ["--compacting-gc"] }
  }
}"#,
        )
        .unwrap();

        let names: Vec<_> = config.canister_names().collect();
        assert_eq!(names, ["web", "backend", "ledger", "worker"]);
        assert_eq!(
            config.get("web").map(|c| &c.kind),
            Some(&CanisterKind::Other("assets".into()))
        );
        assert_eq!(
            config.get("worker"),
            Some(&CanisterSpec::motoko("worker", "src/worker.mo").with_args(["--compacting-gc"]))
        );
    }

    #[test]
    fn has_no_project_level_settings() {
        let config = parse(r#"{ "canisters": { "a": { "main": "a.mo" } } }"#).unwrap();
        assert!(config.build_args.is_empty());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn string_args_on_motoko_canister_are_rejected() {
        let err = parse(r#"{ "canisters": { "a": { "main": "a.mo", "args": "--release" } } }"#)
            .unwrap_err();
        assert!(
            matches!(
                &err,
                ConfigError::InvalidArgsType { scope: ArgsScope::Canister(name), format: ConfigFormat::Dfx }
                    if name == "a"
            ),
            "got: {err}"
        );
    }

    #[test]
    fn string_args_on_foreign_canister_are_ignored() {
        let config = parse(r#"{ "canisters": { "r": { "type": "rust", "args": "--release" } } }"#)
            .unwrap();
        assert!(config.get("r").is_some_and(|c| c.extra_args.is_empty()));
    }

    #[test]
    fn non_object_canister_is_a_parse_error() {
        let err = parse(r#"{ "canisters": { "a": "main.mo" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_canisters_yields_empty_project() {
        let config = parse("{}").unwrap();
        assert!(config.canisters.is_empty());
    }
}

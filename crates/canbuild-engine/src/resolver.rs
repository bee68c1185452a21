//! Target selection and validation.
//!
//! Resolution runs to completion before any compiler is spawned, so a
//! batch never starts with a target that is known to be unbuildable.

use std::collections::HashSet;

use canbuild_common::error::ConfigError;
use canbuild_common::types::{CanisterSpec, ProjectConfig};

/// Computes the ordered set of canisters to build.
///
/// With no explicit selection every default-toolchain canister is built in
/// source order. An explicit selection is built in the order given;
/// canisters of other toolchains are dropped from it silently and repeated
/// names are built once.
///
/// # Errors
///
/// - [`ConfigError::EmptyTargetList`] for an explicit empty selection.
/// - [`ConfigError::NoCanisters`] if the project has no buildable canister.
/// - [`ConfigError::UnknownCanister`] for a name the project does not declare.
/// - [`ConfigError::NoValidTargets`] if nothing is left after filtering.
/// - [`ConfigError::MissingEntryPoint`] if a selected canister has no `main`.
pub fn resolve(
    config: &ProjectConfig,
    requested: Option<&[String]>,
) -> Result<Vec<CanisterSpec>, ConfigError> {
    if requested.is_some_and(<[String]>::is_empty) {
        return Err(ConfigError::EmptyTargetList);
    }
    if !config.canisters.iter().any(|c| c.kind.is_default()) {
        return Err(ConfigError::NoCanisters {
            format: config.format,
        });
    }

    let targets = match requested {
        None => config
            .canisters
            .iter()
            .filter(|c| c.kind.is_default())
            .cloned()
            .collect(),
        Some(names) => select(config, names)?,
    };

    if targets.is_empty() {
        return Err(ConfigError::NoValidTargets);
    }
    check_entry_points(&targets)?;

    tracing::debug!(
        targets = ?targets.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "resolved build targets"
    );
    Ok(targets)
}

fn select(config: &ProjectConfig, names: &[String]) -> Result<Vec<CanisterSpec>, ConfigError> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(names.len());
    for name in names {
        let spec = config
            .get(name)
            .ok_or_else(|| ConfigError::UnknownCanister {
                name: name.clone(),
                format: config.format,
            })?;
        if !spec.kind.is_default() {
            tracing::debug!(canister = %name, kind = %spec.kind, "skipping canister of another toolchain");
            continue;
        }
        if seen.insert(name.as_str()) {
            targets.push(spec.clone());
        }
    }
    Ok(targets)
}

fn check_entry_points(targets: &[CanisterSpec]) -> Result<(), ConfigError> {
    match targets.iter().find(|c| c.entry_point().is_none()) {
        Some(missing) => Err(ConfigError::MissingEntryPoint {
            name: missing.name.clone(),
        }),
        None => Ok(()),
    }
}

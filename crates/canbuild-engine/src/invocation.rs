//! Compiler command-line assembly.

use std::path::{Path, PathBuf};

use canbuild_common::constants::ARTIFACT_EXTENSION;
use canbuild_common::types::CanisterSpec;

/// Flags passed first on every invocation: compile to wasm and emit Candid.
const FIXED_FLAGS: [&str; 2] = ["-c", "--idl"];

/// A fully assembled compiler invocation for one canister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    /// Canister being built.
    pub canister_name: String,
    /// Compiler binary.
    pub program: PathBuf,
    /// Arguments passed to the compiler, in order.
    pub argv: Vec<String>,
    /// Path of the wasm artifact the compiler writes.
    pub output_artifact_path: PathBuf,
}

/// Returns `{output_dir}/{name}.wasm`.
#[must_use]
pub fn artifact_path(output_dir: &Path, canister_name: &str) -> PathBuf {
    output_dir.join(format!("{canister_name}.{ARTIFACT_EXTENSION}"))
}

/// Assembles the compiler command line for `canister`.
///
/// Argument order is fixed because the compiler is order-sensitive:
///
/// 1. `-c --idl`
/// 2. `-o <output_dir>/<name>.wasm`
/// 3. the entry source file
/// 4. `cli_args` from the command line
/// 5. `source_args` (package search paths)
/// 6. `project_args` (`[build] args`)
/// 7. the canister's own `args`
///
/// Canister-level arguments come last so that "last wins" flags let a
/// canister override project-wide settings.
#[must_use]
pub fn build_invocation(
    compiler: &Path,
    canister: &CanisterSpec,
    output_dir: &Path,
    project_args: &[String],
    cli_args: &[String],
    source_args: &[String],
) -> BuildTask {
    let output_artifact_path = artifact_path(output_dir, &canister.name);

    let mut argv = Vec::with_capacity(
        FIXED_FLAGS.len()
            + 3
            + cli_args.len()
            + source_args.len()
            + project_args.len()
            + canister.extra_args.len(),
    );
    argv.extend(FIXED_FLAGS.iter().map(|f| (*f).to_owned()));
    argv.push("-o".to_owned());
    argv.push(output_artifact_path.to_string_lossy().into_owned());
    argv.push(canister.entry_point().unwrap_or_default().to_owned());
    argv.extend_from_slice(cli_args);
    argv.extend_from_slice(source_args);
    argv.extend_from_slice(project_args);
    argv.extend_from_slice(&canister.extra_args);

    BuildTask {
        canister_name: canister.name.clone(),
        program: compiler.to_path_buf(),
        argv,
        output_artifact_path,
    }
}

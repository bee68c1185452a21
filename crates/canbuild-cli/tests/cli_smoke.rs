//! CLI smoke tests for canbuild.
//!
//! A shell script stands in for `moc`: it writes the artifact named after
//! `-o` and fails for entry files whose name contains `broken`.

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Fake compiler: `$4` is the artifact path, `$5` the entry file.
const FAKE_MOC: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/invocations.log"
case "$5" in
  *broken*) echo "$5:1.1: syntax error" >&2; exit 1;;
esac
touch "$4"
"#;

fn canbuild(project: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("canbuild");
    let _ = cmd.current_dir(project).env_remove("DFX_MOC_PATH").env_remove("RUST_LOG");
    cmd
}

/// Creates a project directory with the given config file and a fake compiler.
fn project(file: &str, content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(file), content).unwrap();
    let bin = temp.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    let moc = bin.join("moc");
    std::fs::write(&moc, FAKE_MOC).unwrap();
    std::fs::set_permissions(&moc, std::fs::Permissions::from_mode(0o755)).unwrap();
    (temp, moc)
}

fn invocations(moc: &Path) -> Vec<String> {
    let log = moc.parent().unwrap().join("invocations.log");
    std::fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_owned)
        .collect()
}

const MOPS_PROJECT: &str = r#"
[build]
args = ["--release"]

[canisters]
alpha = "src/alpha.mo"
beta = { main = "src/beta.mo", args = ["--public-metadata", "candid:service"] }
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
    cargo_bin_cmd!("canbuild")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn build_help_lists_flags() {
    cargo_bin_cmd!("canbuild")
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--keep-going"))
        .stdout(predicate::str::contains("--dfx"));
}

// =============================================================================
// Successful builds
// =============================================================================

#[test]
fn builds_every_mops_canister() {
    let (temp, moc) = project("mops.toml", MOPS_PROJECT);

    canbuild(temp.path())
        .args(["build", "--moc"])
        .arg(&moc)
        .assert()
        .success()
        .stdout(predicate::str::contains("build canister"))
        .stdout(predicate::str::contains("Built 2 canisters"));

    assert!(temp.path().join(".mops/.build/alpha.wasm").exists());
    assert!(temp.path().join(".mops/.build/beta.wasm").exists());
    assert_eq!(
        invocations(&moc),
        [
            "-c --idl -o .mops/.build/alpha.wasm src/alpha.mo --release",
            "-c --idl -o .mops/.build/beta.wasm src/beta.mo --release --public-metadata candid:service",
        ]
    );
}

#[test]
fn named_canister_and_pass_through_args() {
    let (temp, moc) = project("mops.toml", MOPS_PROJECT);

    canbuild(temp.path())
        .args(["build", "beta", "-o", "out", "--moc"])
        .arg(&moc)
        .args(["--", "--hide-warnings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 1 canister"));

    assert_eq!(
        invocations(&moc),
        ["-c --idl -o out/beta.wasm src/beta.mo --hide-warnings --release --public-metadata candid:service"]
    );
}

#[test]
fn dfx_mode_skips_other_toolchains() {
    let (temp, moc) = project(
        "dfx.json",
        r#"{"canisters": {
            "assets": {"type": "assets", "source": ["dist"]},
            "backend": {"type": "motoko", "main": "src/main.mo"}
        }}"#,
    );

    canbuild(temp.path())
        .args(["build", "--dfx"])
        .env("DFX_MOC_PATH", &moc)
        .assert()
        .success();

    assert_eq!(
        invocations(&moc),
        ["-c --idl -o .mops/.build/backend.wasm src/main.mo"]
    );
}

#[test]
fn package_dependencies_become_search_paths() {
    let (temp, moc) = project(
        "mops.toml",
        r#"
[dependencies]
base = "0.11.1"

[canisters]
app = "main.mo"
"#,
    );

    canbuild(temp.path())
        .args(["build", "--moc"])
        .arg(&moc)
        .assert()
        .success();

    assert_eq!(
        invocations(&moc),
        ["-c --idl -o .mops/.build/app.wasm main.mo --package base .mops/base@0.11.1/src"]
    );
}

// =============================================================================
// Failures and exit codes
// =============================================================================

#[test]
fn compiler_failure_stops_batch_and_exits_one() {
    let (temp, moc) = project(
        "mops.toml",
        r#"
[canisters]
first = "first.mo"
second = "broken.mo"
third = "third.mo"
"#,
    );

    canbuild(temp.path())
        .args(["build", "--moc"])
        .arg(&moc)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to build canister second"))
        .stderr(predicate::str::contains("syntax error"));

    assert_eq!(invocations(&moc).len(), 2);
    assert!(!temp.path().join(".mops/.build/third.wasm").exists());
}

#[test]
fn keep_going_attempts_every_canister() {
    let (temp, moc) = project(
        "mops.toml",
        r#"
[canisters]
first = "broken.mo"
second = "second.mo"
"#,
    );

    canbuild(temp.path())
        .args(["build", "--keep-going", "--moc"])
        .arg(&moc)
        .assert()
        .code(1);

    assert_eq!(invocations(&moc).len(), 2);
    assert!(temp.path().join(".mops/.build/second.wasm").exists());
}

#[test]
fn unknown_canister_is_a_configuration_error() {
    let (temp, moc) = project("mops.toml", MOPS_PROJECT);

    canbuild(temp.path())
        .args(["build", "gamma", "--moc"])
        .arg(&moc)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'gamma' not found in mops.toml"));

    assert!(invocations(&moc).is_empty());
}

#[test]
fn string_args_are_a_configuration_error() {
    let (temp, moc) = project(
        "mops.toml",
        r#"
[canisters.app]
main = "main.mo"
args = "--release"
"#,
    );

    canbuild(temp.path())
        .args(["build", "--moc"])
        .arg(&moc)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("should be an array of strings"));
}

#[test]
fn dependency_without_location_is_a_configuration_error() {
    let (temp, moc) = project(
        "mops.toml",
        r#"
[dependencies]
broken = {}

[canisters]
app = "main.mo"
"#,
    );

    canbuild(temp.path())
        .args(["build", "--moc"])
        .arg(&moc)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dependency 'broken'"));

    assert!(invocations(&moc).is_empty());
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();

    canbuild(temp.path())
        .args(["build", "--dfx"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dfx.json"));
}

#[test]
fn missing_compiler_exits_three() {
    let (temp, _moc) = project("mops.toml", MOPS_PROJECT);

    canbuild(temp.path())
        .args(["build", "--moc", "/nonexistent/moc"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error while compiling canister alpha"));
}

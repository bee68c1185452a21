//! # canbuild-config
//!
//! Loads a project's canister definitions from one of two mutually
//! exclusive sources and normalizes them into a
//! [`ProjectConfig`](canbuild_common::types::ProjectConfig).
//!
//! Handles:
//! - **mops**: `mops.toml`, where a canister is a bare entry path or a table.
//! - **dfx**: `dfx.json`, where every canister carries a `type` tag.
//! - **Args**: typed validation of `args` fields, done once at load time.
//! - **Sources**: `--package` search-path arguments for declared dependencies.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod args;
pub mod dfx;
pub mod loader;
pub mod mops;
pub mod sources;

pub use loader::{ConfigLoader, load_project_config};

//! # canbuild-common
//!
//! Shared types, error definitions, build options, and constants used
//! across the entire canbuild workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the project model (`ProjectConfig`,
//! `CanisterSpec`) that the config adapter produces and the build engine
//! consumes.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

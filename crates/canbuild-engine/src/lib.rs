//! Canister build pipeline for canbuild.
//!
//! Data flows one way: the [`batch`] runner resolves targets with the
//! [`resolver`], builds one compiler command line per canister with
//! [`invocation`], and runs it through an [`executor`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod batch;
pub mod executor;
pub mod invocation;
pub mod locator;
pub mod resolver;

//! Typed `args` fields shared by both configuration formats.

use canbuild_common::error::{ArgsScope, ConfigError};
use canbuild_common::types::ConfigFormat;
use serde::Deserialize;
use serde::de::IgnoredAny;

/// An `args` value as written in the source file.
///
/// Anything that is not an array of strings lands in `Malformed` so the
/// loader can report it with its scope instead of a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ArgsField {
    List(Vec<String>),
    Malformed(IgnoredAny),
}

impl ArgsField {
    pub(crate) fn into_args(
        field: Option<Self>,
        scope: ArgsScope,
        format: ConfigFormat,
    ) -> Result<Vec<String>, ConfigError> {
        match field {
            None => Ok(Vec::new()),
            Some(Self::List(args)) => Ok(args),
            Some(Self::Malformed(_)) => Err(ConfigError::InvalidArgsType { scope, format }),
        }
    }
}

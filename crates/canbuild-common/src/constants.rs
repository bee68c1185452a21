//! System-wide constants and default paths.

/// Default output directory for compiled artifacts, relative to the project root.
pub const DEFAULT_BUILD_OUTPUT_DIR: &str = ".mops/.build";

/// Project-local package cache directory.
pub const PACKAGES_DIR: &str = ".mops";

/// Name of the mops project configuration file.
pub const MOPS_CONFIG_FILE: &str = "mops.toml";

/// Name of the dfx project configuration file.
pub const DFX_CONFIG_FILE: &str = "dfx.json";

/// File extension of compiled canister artifacts.
pub const ARTIFACT_EXTENSION: &str = "wasm";

/// Name of the compiler binary looked up on `PATH`.
pub const COMPILER_BIN: &str = "moc";

/// Environment variable that overrides the compiler location.
pub const COMPILER_PATH_ENV: &str = "DFX_MOC_PATH";

/// Canister `type` tag handled by this pipeline.
pub const DEFAULT_CANISTER_KIND: &str = "motoko";

/// Base directory of a package's sources unless it declares otherwise.
pub const DEFAULT_PACKAGE_BASE_DIR: &str = "src";

//! Constants for bundle-manifest.
//!
//! File names, wire values and environment variables shared by the stage
//! and the CLI host.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The output file written by the manifest stage, relative to the working directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Version of the manifest schema emitted by this stage.
pub const MANIFEST_VERSION: u32 = 6;

/// Default project configuration file.
pub const DEFAULT_PROJECT_FILE: &str = "project.json";

/// Default artifact listing file.
pub const DEFAULT_ARTIFACTS_FILE: &str = "artifacts.json";

/// Environment variable overriding the generated build identifier.
pub const BUILD_ID_ENV: &str = "BUNDLE_BUILD_ID";

/// Bundle tag discriminant for device bundles.
pub const DEVICE_TAG: &str = "device";

/// Bundle tag discriminant for companion bundles.
pub const COMPANION_TAG: &str = "companion";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Get the build identifier, checking BUNDLE_BUILD_ID first.
///
/// Falls back to a random 64-bit identifier rendered as `0x` plus 16 hex digits.
pub fn get_build_id() -> String {
    std::env::var(BUILD_ID_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("0x{:016x}", rand::random::<u64>()))
}

//! Error types for bundle-manifest.

use thiserror::Error;

use crate::validate::BundleTagError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for manifest stage operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Error type for manifest stage operations.
///
/// Every variant is fatal to the stage. None of them leave a manifest behind.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// An attached bundle tag is malformed or unrecognized.
    #[error(transparent)]
    InvalidBundleTag(#[from] BundleTagError),

    /// Native and JS device bundles were both registered in one build.
    #[error("cannot bundle mixed native and JS device components: {file}")]
    MixedComponentType {
        /// The artifact that introduced the conflict.
        file: String,
    },

    /// Two bundles claim the same slot.
    #[error("duplicate {slot} component bundles: {file} / {existing}")]
    DuplicateComponent {
        /// The contested slot (a device family or `companion`).
        slot: String,
        /// The artifact being ingested.
        file: String,
        /// The artifact already registered for the slot.
        existing: String,
    },

    /// An operation was attempted on a finalized aggregator.
    #[error("cannot {operation}: manifest already finalized")]
    Lifecycle {
        /// The rejected operation (e.g. "ingest device-ionic.zip").
        operation: String,
    },

    /// No API versions are known for the configured toolchain version.
    #[error("no API versions known for toolchain version {version}")]
    VersionResolution {
        /// The configured toolchain version.
        version: String,
    },

    /// Configuration parse error.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// TOML deserialization error.
    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<anyhow::Error> for ManifestError {
    fn from(err: anyhow::Error) -> Self {
        ManifestError::Generic(err.to_string())
    }
}

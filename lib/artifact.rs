//! Build artifacts flowing through the manifest stage.

use serde::{Deserialize, Serialize};

use crate::bundle::BundleTag;
use crate::error::{ManifestError, ManifestResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A compiled build output with the metadata the packaging pipeline attached to it.
///
/// The stage never changes an artifact; it reads the attachments and hands the
/// artifact back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Path of the artifact relative to the package root.
    pub path: String,

    /// Raw bundle tag, validated on ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<serde_json::Value>,

    /// Dot-delimited key under which this file is recorded in `sourceMaps`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Artifact {
    /// Create an artifact with no attachments.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            bundle: None,
            source_map: None,
        }
    }

    /// Attach a bundle tag in its wire shape.
    pub fn with_bundle(mut self, tag: &BundleTag) -> Self {
        self.bundle = Some(tag.to_value());
        self
    }

    /// Attach a raw, unvalidated bundle tag.
    pub fn with_raw_bundle(mut self, raw: serde_json::Value) -> Self {
        self.bundle = Some(raw);
        self
    }

    /// Attach a source map key.
    pub fn with_source_map(mut self, key: impl Into<String>) -> Self {
        self.source_map = Some(key.into());
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse an artifact listing (a JSON array of artifacts).
pub fn parse_artifacts(content: &str) -> ManifestResult<Vec<Artifact>> {
    serde_json::from_str(content)
        .map_err(|e| ManifestError::ConfigParseError(format!("artifact listing: {}", e)))
}

/// Normalize a relative path to forward slashes.
///
/// Backslashes become `/`, `.` segments and repeated separators are dropped.
/// A leading `/` is kept.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if unified.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

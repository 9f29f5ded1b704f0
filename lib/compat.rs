//! Compatibility lookups: device capabilities and SDK API versions.
//!
//! The stage consumes both as opaque tables. The CLI loads them from JSON
//! files; library users can supply any implementation of the traits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ManifestError, ManifestResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// API versions exposed to the device and companion runtimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersions {
    pub device_api: String,
    pub companion_api: String,
}

/// Toolchain version → API versions.
///
/// Lookup tries the exact version first, then its `MAJOR.MINOR` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiVersionTable {
    entries: BTreeMap<String, ApiVersions>,
}

/// Device family → capability object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CapabilityTable {
    entries: BTreeMap<String, serde_json::Value>,
}

/// A capability lookup that knows no families.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapabilities;

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Resolves the API versions for a configured toolchain version.
pub trait ApiVersionResolver {
    /// Returns `None` when the version is unknown.
    fn resolve(&self, toolchain_version: &str) -> Option<ApiVersions>;
}

/// Looks up what a device family supports.
pub trait CapabilityLookup {
    fn supports(&self, family: &str) -> Option<serde_json::Value>;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ApiVersions {
    /// Create an API version pair.
    pub fn new(device_api: impl Into<String>, companion_api: impl Into<String>) -> Self {
        Self {
            device_api: device_api.into(),
            companion_api: companion_api.into(),
        }
    }
}

impl ApiVersionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping.
    pub fn with(mut self, toolchain_version: impl Into<String>, versions: ApiVersions) -> Self {
        self.entries.insert(toolchain_version.into(), versions);
        self
    }

    /// Parse a table from a JSON object.
    pub fn from_json_str(content: &str) -> ManifestResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ManifestError::ConfigParseError(format!("API version table: {}", e)))
    }

    /// Number of known toolchain versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CapabilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family.
    pub fn with(mut self, family: impl Into<String>, supports: serde_json::Value) -> Self {
        self.entries.insert(family.into(), supports);
        self
    }

    /// Parse a table from a JSON object.
    pub fn from_json_str(content: &str) -> ManifestResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ManifestError::ConfigParseError(format!("capability table: {}", e)))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ApiVersionResolver for ApiVersionTable {
    fn resolve(&self, toolchain_version: &str) -> Option<ApiVersions> {
        if let Some(versions) = self.entries.get(toolchain_version) {
            return Some(versions.clone());
        }

        let version = semver::Version::parse(toolchain_version.trim()).ok()?;
        self.entries
            .get(&format!("{}.{}", version.major, version.minor))
            .cloned()
    }
}

impl<F> ApiVersionResolver for F
where
    F: Fn(&str) -> Option<ApiVersions>,
{
    fn resolve(&self, toolchain_version: &str) -> Option<ApiVersions> {
        self(toolchain_version)
    }
}

impl CapabilityLookup for CapabilityTable {
    fn supports(&self, family: &str) -> Option<serde_json::Value> {
        self.entries.get(family).cloned()
    }
}

impl CapabilityLookup for NoCapabilities {
    fn supports(&self, _family: &str) -> Option<serde_json::Value> {
        None
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_version_lookup() {
        let table = ApiVersionTable::new().with("6.1.0", ApiVersions::new("8.2.0", "3.3.0"));
        assert_eq!(
            table.resolve("6.1.0"),
            Some(ApiVersions::new("8.2.0", "3.3.0"))
        );
    }

    #[test]
    fn test_major_minor_fallback() {
        let table = ApiVersionTable::new().with("5.0", ApiVersions::new("5.0.0", "3.0.0"));
        assert_eq!(
            table.resolve("5.0.2"),
            Some(ApiVersions::new("5.0.0", "3.0.0"))
        );
        assert_eq!(table.resolve("5.1.0"), None);
        assert_eq!(table.resolve("not-a-version"), None);
    }

    #[test]
    fn test_parse_version_table() {
        let table = ApiVersionTable::from_json_str(
            r#"{ "4.2.0": { "deviceApi": "4.2.0", "companionApi": "2.2.0" } }"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("4.2.0").unwrap().companion_api, "2.2.0");
    }

    #[test]
    fn test_parse_version_table_rejects_bad_entries() {
        let err = ApiVersionTable::from_json_str(r#"{ "4.2.0": "4.2.0" }"#).unwrap_err();
        assert!(matches!(err, ManifestError::ConfigParseError(_)));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |v: &str| (v == "1.0.0").then(|| ApiVersions::new("1.0.0", "1.0.0"));
        assert!(resolver.resolve("1.0.0").is_some());
        assert!(resolver.resolve("2.0.0").is_none());
    }

    #[test]
    fn test_capability_table() {
        let table = CapabilityTable::from_json_str(
            r#"{ "ionic": { "screenSize": { "w": 348, "h": 250 } } }"#,
        )
        .unwrap();
        assert_eq!(
            table.supports("ionic"),
            Some(json!({ "screenSize": { "w": 348, "h": 250 } }))
        );
        assert_eq!(table.supports("versa"), None);
        assert_eq!(NoCapabilities.supports("ionic"), None);
    }
}

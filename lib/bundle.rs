//! Bundle tag types attached to build artifacts.

use serde::Serialize;
use serde_json::json;

use crate::constants::{COMPANION_TAG, DEVICE_TAG};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validated metadata describing what kind of bundle an artifact is.
///
/// Produced only by [`validate_bundle_tag`](crate::validate::validate_bundle_tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BundleTag {
    /// Bundle that runs on a device family.
    Device(DeviceTag),
    /// Bundle that runs in the companion runtime.
    Companion,
}

/// Device bundle metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTag {
    /// Device hardware line this bundle is built for.
    pub family: String,

    /// Platforms the bundle targets, in declared order without duplicates.
    pub platform: Vec<String>,

    /// Whether the bundle is native code rather than JS.
    pub is_native: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BundleTag {
    /// Create a JS device tag.
    pub fn device(family: impl Into<String>, platform: &[&str]) -> Self {
        BundleTag::Device(DeviceTag {
            family: family.into(),
            platform: platform.iter().map(|p| p.to_string()).collect(),
            is_native: false,
        })
    }

    /// Create a native device tag.
    pub fn native_device(family: impl Into<String>, platform: &[&str]) -> Self {
        BundleTag::Device(DeviceTag {
            family: family.into(),
            platform: platform.iter().map(|p| p.to_string()).collect(),
            is_native: true,
        })
    }

    /// Render the tag in its wire shape, as a pipeline host would attach it.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            BundleTag::Device(device) => json!({
                "type": DEVICE_TAG,
                "family": device.family,
                "platform": device.platform,
                "isNative": device.is_native,
            }),
            BundleTag::Companion => json!({ "type": COMPANION_TAG }),
        }
    }

    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            BundleTag::Device(device) if device.is_native => "native device",
            BundleTag::Device(_) => "device",
            BundleTag::Companion => "companion",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_value_wire_shape() {
        assert_eq!(
            BundleTag::native_device("fenix", &["fenix", "atlas"]).to_value(),
            json!({
                "type": "device",
                "family": "fenix",
                "platform": ["fenix", "atlas"],
                "isNative": true
            })
        );
        assert_eq!(BundleTag::Companion.to_value(), json!({ "type": "companion" }));
    }

    #[test]
    fn test_to_value_matches_serialized_form() {
        let tag = BundleTag::device("ionic", &["ionic"]);
        assert_eq!(tag.to_value(), serde_json::to_value(&tag).unwrap());
    }
}

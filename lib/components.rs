//! Component tree accumulated from bundle artifacts.

use indexmap::IndexMap;
use serde::Serialize;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Components registered for the build so far.
///
/// Serializes as the manifest's `components` object. The nativity flags are
/// bookkeeping for the aggregator and never reach the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentsState {
    /// Device bundles keyed by family, in registration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub watch: IndexMap<String, WatchComponent>,

    /// The companion bundle, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion: Option<CompanionComponent>,

    /// Tiles resolved at finalize.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<Tile>>,

    /// A native device bundle has been registered.
    #[serde(skip)]
    pub has_native: bool,

    /// A JS device bundle has been registered.
    #[serde(skip)]
    pub has_js: bool,
}

/// A device bundle entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchComponent {
    /// Normalized path of the bundle.
    pub filename: String,

    /// Platforms the bundle targets.
    pub platform: Vec<String>,

    /// Device capabilities exposed to JS bundles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports: Option<serde_json::Value>,
}

/// The companion bundle entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionComponent {
    /// Normalized path of the bundle.
    pub filename: String,
}

/// A tile scoped to the device families it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: String,
    pub name: String,
    pub platforms: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ComponentsState {
    /// Families with a registered device bundle, in registration order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.watch.keys().map(String::as_str)
    }

    /// Returns true if a JS device bundle is registered.
    pub fn has_js_watch(&self) -> bool {
        !self.watch.is_empty() && self.has_js
    }
}

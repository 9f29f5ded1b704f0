//! Project configuration consumed by the manifest stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use crate::error::{ManifestError, ManifestResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// What kind of package the project builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Full application with optional device tiles.
    #[default]
    Application,
    /// Clock face.
    Clockface,
    /// Companion-only package.
    Companion,
}

/// A tile declared in the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDeclaration {
    /// Display name.
    pub name: String,

    /// Tile identifier.
    pub id: String,

    /// Device families the tile is limited to. Absent means every registered family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_targets: Option<Vec<String>>,
}

/// Project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Package kind.
    #[serde(default)]
    pub app_type: AppType,

    /// Application identifier, passed through to the manifest verbatim.
    pub app_id: String,

    /// Permissions the application requests, passed through verbatim.
    #[serde(default)]
    pub requested_permissions: Vec<String>,

    /// Toolchain version used to resolve the SDK API versions.
    pub sdk_version: String,

    /// Tile declarations.
    #[serde(default)]
    pub tiles: Vec<TileDeclaration>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl TileDeclaration {
    /// Create a tile declaration applying to every registered family.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            build_targets: None,
        }
    }

    /// Limit the tile to the given families.
    pub fn with_build_targets(mut self, targets: &[&str]) -> Self {
        self.build_targets = Some(targets.iter().map(|t| t.to_string()).collect());
        self
    }
}

impl ProjectConfig {
    /// Create an application project with no permissions or tiles.
    pub fn new(app_id: impl Into<String>, sdk_version: impl Into<String>) -> Self {
        Self {
            app_type: AppType::Application,
            app_id: app_id.into(),
            requested_permissions: Vec::new(),
            sdk_version: sdk_version.into(),
            tiles: Vec::new(),
        }
    }

    /// Parse a project configuration, choosing TOML or JSON by the file extension.
    pub fn parse(path: &Path, content: &str) -> ManifestResult<Self> {
        let config: ProjectConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(content)?,
            _ => serde_json::from_str(content).map_err(|e| {
                ManifestError::ConfigParseError(format!("{}: {}", path.display(), e))
            })?,
        };
        config.check()?;
        Ok(config)
    }

    /// Check the fields the manifest relies on.
    pub fn check(&self) -> ManifestResult<()> {
        if Uuid::parse_str(&self.app_id).is_err() {
            return Err(ManifestError::ConfigParseError(format!(
                "appId `{}` is not a valid UUID",
                self.app_id
            )));
        }

        if self.sdk_version.trim().is_empty() {
            return Err(ManifestError::ConfigParseError(
                "sdkVersion must not be empty".into(),
            ));
        }

        let mut seen = BTreeSet::new();
        for permission in &self.requested_permissions {
            if !seen.insert(permission.as_str()) {
                return Err(ManifestError::ConfigParseError(format!(
                    "permission `{}` is requested more than once",
                    permission
                )));
            }
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppType::Application => write!(f, "application"),
            AppType::Clockface => write!(f, "clockface"),
            AppType::Companion => write!(f, "companion"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

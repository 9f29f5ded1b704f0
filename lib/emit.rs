//! Manifest descriptor assembly.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::components::ComponentsState;
use crate::constants::{MANIFEST_FILE, MANIFEST_VERSION};
use crate::context::ManifestContext;
use crate::error::{ManifestError, ManifestResult};
use crate::source_map::SourceMapTree;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The package manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDescriptor {
    /// Opaque build identifier.
    pub build_id: String,

    /// Registered components.
    pub components: ComponentsState,

    /// Source map paths keyed by their association keys.
    pub source_maps: SourceMapTree,

    /// Manifest schema version, always [`MANIFEST_VERSION`].
    pub manifest_version: u32,

    /// API versions the bundles were built against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<SdkVersion>,

    /// Permissions copied from the project configuration.
    pub requested_permissions: Vec<String>,

    /// Application identifier copied from the project configuration.
    pub app_id: String,
}

/// API versions recorded in the manifest.
///
/// Each side is present only if the build contains a bundle for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_api: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_api: Option<String>,
}

/// The stage's single output artifact.
#[derive(Debug, Clone)]
pub struct ManifestOutput {
    /// Output path relative to the working directory.
    pub path: PathBuf,

    /// The manifest.
    pub descriptor: ManifestDescriptor,

    /// UTF-8 JSON rendering of the manifest.
    pub contents: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ManifestOutput {
    /// Resolve the output path against a working directory.
    pub fn resolve_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.path)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the manifest from finalized components and source maps.
///
/// API versions are resolved only when a JS device bundle or a companion
/// bundle is present; an unknown toolchain version is then fatal.
pub fn emit_manifest(
    context: &ManifestContext<'_>,
    components: ComponentsState,
    source_maps: SourceMapTree,
) -> ManifestResult<ManifestOutput> {
    let sdk_version = resolve_sdk_version(context, &components)?;

    let descriptor = ManifestDescriptor {
        build_id: context.build_id.clone(),
        components,
        source_maps,
        manifest_version: MANIFEST_VERSION,
        sdk_version,
        requested_permissions: context.project.requested_permissions.clone(),
        app_id: context.project.app_id.clone(),
    };

    let contents = serde_json::to_string_pretty(&descriptor)?;

    tracing::info!(
        build_id = %descriptor.build_id,
        watch = descriptor.components.watch.len(),
        companion = descriptor.components.companion.is_some(),
        "manifest emitted"
    );

    Ok(ManifestOutput {
        path: PathBuf::from(MANIFEST_FILE),
        descriptor,
        contents,
    })
}

fn resolve_sdk_version(
    context: &ManifestContext<'_>,
    components: &ComponentsState,
) -> ManifestResult<Option<SdkVersion>> {
    let has_js_watch = components.has_js_watch();
    let has_companion = components.companion.is_some();

    if !has_js_watch && !has_companion {
        return Ok(None);
    }

    let version = &context.project.sdk_version;
    let api = context
        .api_versions
        .resolve(version)
        .ok_or_else(|| ManifestError::VersionResolution {
            version: version.clone(),
        })?;

    Ok(Some(SdkVersion {
        device_api: has_js_watch.then(|| api.device_api.clone()),
        companion_api: has_companion.then_some(api.companion_api),
    }))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

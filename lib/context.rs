//! Collaborators handed to the manifest stage for one build.

use crate::compat::{ApiVersionResolver, CapabilityLookup};
use crate::project::ProjectConfig;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Everything the stage reads but does not own.
#[derive(Clone)]
pub struct ManifestContext<'a> {
    /// Opaque build identifier supplied by the host.
    pub build_id: String,

    /// Project configuration.
    pub project: &'a ProjectConfig,

    /// Device capability lookup, consulted for JS device bundles.
    pub capabilities: &'a dyn CapabilityLookup,

    /// API version resolution, consulted at finalize.
    pub api_versions: &'a dyn ApiVersionResolver,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> ManifestContext<'a> {
    /// Create a context.
    pub fn new(
        build_id: impl Into<String>,
        project: &'a ProjectConfig,
        capabilities: &'a dyn CapabilityLookup,
        api_versions: &'a dyn ApiVersionResolver,
    ) -> Self {
        Self {
            build_id: build_id.into(),
            project,
            capabilities,
            api_versions,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl std::fmt::Debug for ManifestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestContext")
            .field("build_id", &self.build_id)
            .field("project", &self.project)
            .field("capabilities", &"<dyn CapabilityLookup>")
            .field("api_versions", &"<dyn ApiVersionResolver>")
            .finish()
    }
}

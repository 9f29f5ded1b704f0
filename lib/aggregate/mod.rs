//! Component aggregation for the manifest stage.
//!
//! The [`ManifestAggregator`] owns the component tree and source map tree for
//! one build. The host pushes artifacts through [`ManifestAggregator::ingest`]
//! one at a time and calls [`ManifestAggregator::finalize`] once the stream
//! ends.
//!
//! # Lifecycle
//!
//! 1. `Empty` -- created, nothing ingested.
//! 2. `Accumulating` -- at least one artifact ingested.
//! 3. `Finalized` -- the manifest was emitted (or finalize failed). Every
//!    further call fails with [`ManifestError::Lifecycle`].
//!
//! A failed ingestion leaves the state exactly as it was before the call.

use crate::artifact::{Artifact, normalize_path};
use crate::bundle::{BundleTag, DeviceTag};
use crate::components::{CompanionComponent, ComponentsState, WatchComponent};
use crate::context::ManifestContext;
use crate::emit::{ManifestOutput, emit_manifest};
use crate::error::{ManifestError, ManifestResult};
use crate::source_map::SourceMapTree;
use crate::tiles::map_tiles;
use crate::validate::validate_bundle_tag;

#[cfg(test)]
mod tests;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Aggregator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// No artifact ingested yet.
    Empty,
    /// At least one artifact ingested.
    Accumulating,
    /// The manifest has been produced.
    Finalized,
}

/// Accumulates bundle artifacts into a manifest.
#[derive(Debug)]
pub struct ManifestAggregator<'a> {
    state: AggregatorState,
    components: ComponentsState,
    source_maps: SourceMapTree,
    ingested: usize,
    context: ManifestContext<'a>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> ManifestAggregator<'a> {
    /// Create an empty aggregator for one build.
    pub fn new(context: ManifestContext<'a>) -> Self {
        Self {
            state: AggregatorState::Empty,
            components: ComponentsState::default(),
            source_maps: SourceMapTree::new(),
            ingested: 0,
            context,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Components registered so far.
    pub fn components(&self) -> &ComponentsState {
        &self.components
    }

    /// Source maps recorded so far.
    pub fn source_maps(&self) -> &SourceMapTree {
        &self.source_maps
    }

    /// Number of artifacts ingested successfully.
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    /// Ingest one artifact and hand it back unchanged.
    pub fn ingest(&mut self, artifact: Artifact) -> ManifestResult<Artifact> {
        if self.state == AggregatorState::Finalized {
            return Err(ManifestError::Lifecycle {
                operation: format!("ingest {}", artifact.path),
            });
        }

        let filename = normalize_path(&artifact.path);

        if let Some(raw) = &artifact.bundle {
            let tag = validate_bundle_tag(raw, &artifact.path)?;
            tracing::debug!(file = %filename, kind = tag.kind(), "registering bundle");
            match tag {
                BundleTag::Device(device) => self.register_device(device, &filename)?,
                BundleTag::Companion => self.register_companion(&filename)?,
            }
        }

        if let Some(key) = &artifact.source_map {
            if self.source_maps.insert(key, filename.clone()).is_some() {
                tracing::debug!(key = %key, file = %filename, "source map overwritten");
            }
        }

        self.state = AggregatorState::Accumulating;
        self.ingested += 1;
        Ok(artifact)
    }

    /// Resolve tiles and emit the manifest.
    ///
    /// May be called once. The aggregator is finalized even if emission fails.
    pub fn finalize(&mut self) -> ManifestResult<ManifestOutput> {
        if self.state == AggregatorState::Finalized {
            return Err(ManifestError::Lifecycle {
                operation: "finalize".into(),
            });
        }

        if self.state == AggregatorState::Empty {
            tracing::warn!("finalizing a build with no artifacts");
        }
        self.state = AggregatorState::Finalized;

        let mut components = std::mem::take(&mut self.components);
        let source_maps = std::mem::take(&mut self.source_maps);
        components.tiles = map_tiles(self.context.project, &components);

        emit_manifest(&self.context, components, source_maps)
    }

    fn register_device(&mut self, device: DeviceTag, filename: &str) -> ManifestResult<()> {
        let has_native = self.components.has_native || device.is_native;
        let has_js = self.components.has_js || !device.is_native;

        if has_native && has_js {
            return Err(ManifestError::MixedComponentType {
                file: filename.to_string(),
            });
        }

        if let Some(existing) = self.components.watch.get(&device.family) {
            return Err(ManifestError::DuplicateComponent {
                slot: device.family,
                file: filename.to_string(),
                existing: existing.filename.clone(),
            });
        }

        let supports = if has_js {
            self.context.capabilities.supports(&device.family)
        } else {
            None
        };

        self.components.has_native = has_native;
        self.components.has_js = has_js;
        self.components.watch.insert(
            device.family,
            WatchComponent {
                filename: filename.to_string(),
                platform: device.platform,
                supports,
            },
        );
        Ok(())
    }

    fn register_companion(&mut self, filename: &str) -> ManifestResult<()> {
        if let Some(existing) = &self.components.companion {
            return Err(ManifestError::DuplicateComponent {
                slot: "companion".into(),
                file: filename.to_string(),
                existing: existing.filename.clone(),
            });
        }

        self.components.companion = Some(CompanionComponent {
            filename: filename.to_string(),
        });
        Ok(())
    }
}

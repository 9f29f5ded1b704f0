//! Drive an artifact stream through the aggregator.

use std::sync::Arc;

use crate::aggregate::ManifestAggregator;
use crate::artifact::Artifact;
use crate::emit::ManifestOutput;
use crate::error::ManifestResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Progress event emitted while the stage runs.
#[derive(Debug, Clone)]
pub enum StageProgress {
    /// An artifact was ingested and forwarded.
    Ingested { path: String, current: usize },
    /// The manifest was emitted.
    Finalized,
}

/// Callback type for progress events.
pub type ProgressCallback = Arc<dyn Fn(StageProgress) + Send + Sync>;

/// Everything the stage hands downstream.
#[derive(Debug, Clone)]
pub struct StageOutput {
    /// Input artifacts, forwarded unchanged and in order.
    pub artifacts: Vec<Artifact>,

    /// The emitted manifest.
    pub manifest: ManifestOutput,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Ingest every artifact in order, then finalize.
///
/// Stops at the first failing artifact; nothing after it is ingested.
pub fn run_stage(
    aggregator: &mut ManifestAggregator<'_>,
    artifacts: impl IntoIterator<Item = Artifact>,
    on_progress: Option<&ProgressCallback>,
) -> ManifestResult<StageOutput> {
    let mut forwarded = Vec::new();

    for artifact in artifacts {
        let artifact = aggregator.ingest(artifact)?;
        if let Some(cb) = on_progress {
            cb(StageProgress::Ingested {
                path: artifact.path.clone(),
                current: aggregator.ingested(),
            });
        }
        forwarded.push(artifact);
    }

    let manifest = aggregator.finalize()?;
    if let Some(cb) = on_progress {
        cb(StageProgress::Finalized);
    }

    Ok(StageOutput {
        artifacts: forwarded,
        manifest,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

//! Manifest emit command handler.

use crate::aggregate::ManifestAggregator;
use crate::constants::get_build_id;
use crate::context::ManifestContext;
use crate::emit::ManifestDescriptor;
use crate::error::ManifestResult;
use crate::stage::{ProgressCallback, StageProgress, run_stage};
use colored::Colorize;
use std::sync::Arc;

use super::common::{load_api_versions, load_artifacts, load_capabilities, load_project};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Options for the emit command.
#[derive(Debug, Default)]
pub struct EmitOptions {
    /// Project configuration file.
    pub project: Option<String>,

    /// Artifact listing file.
    pub artifacts: Option<String>,

    /// Device capability table.
    pub capabilities: Option<String>,

    /// Toolchain to API version table.
    pub api_versions: Option<String>,

    /// Build identifier override.
    pub build_id: Option<String>,

    /// Skip writing the manifest.
    pub dry_run: bool,

    /// Print the manifest JSON instead of a summary.
    pub json: bool,

    /// List every forwarded artifact.
    pub verbose: bool,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Run the manifest stage over an artifact listing and write `manifest.json`.
pub async fn emit_bundle_manifest(options: EmitOptions) -> ManifestResult<()> {
    let project = load_project(options.project).await?;
    let (listing, artifacts) = load_artifacts(options.artifacts).await?;
    let capabilities = load_capabilities(options.capabilities).await?;
    let api_versions = load_api_versions(options.api_versions).await?;

    let build_id = options.build_id.unwrap_or_else(get_build_id);
    let context = ManifestContext::new(build_id, &project, &capabilities, &api_versions);
    let mut aggregator = ManifestAggregator::new(context);

    let on_progress: Option<ProgressCallback> = (options.verbose && !options.json).then(|| {
        Arc::new(|event: StageProgress| {
            if let StageProgress::Ingested { path, current } = event {
                println!("    {} {}", format!("{:>3}", current).dimmed(), path);
            }
        }) as ProgressCallback
    });

    let output = run_stage(&mut aggregator, artifacts, on_progress.as_ref())?;

    if !options.dry_run {
        let path = output.manifest.resolve_path(&std::env::current_dir()?);
        tokio::fs::write(&path, &output.manifest.contents).await?;
        tracing::info!(path = %path.display(), "manifest written");
    }

    if options.json {
        println!("{}", output.manifest.contents);
        return Ok(());
    }

    let verb = if options.dry_run {
        "Would create"
    } else {
        "Created"
    };
    println!(
        "  {} {} {} from {}",
        "✓".bright_green(),
        verb,
        output.manifest.path.display().to_string().bright_green(),
        listing.display().to_string().bold()
    );
    print_summary(&output.manifest.descriptor, output.artifacts.len());

    Ok(())
}

fn print_summary(descriptor: &ManifestDescriptor, artifact_count: usize) {
    let components = &descriptor.components;

    println!("    {}: {}", "Build".dimmed(), descriptor.build_id);
    println!("    {}: {}", "Artifacts".dimmed(), artifact_count);

    if !components.watch.is_empty() {
        let kind = if components.has_native { "native" } else { "JS" };
        let families: Vec<&str> = components.families().collect();
        println!(
            "    {}: {} ({})",
            "Watch".dimmed(),
            families.join(", ").bright_cyan(),
            kind
        );
    }

    if let Some(companion) = &components.companion {
        println!("    {}: {}", "Companion".dimmed(), companion.filename);
    }

    if let Some(tiles) = &components.tiles {
        for tile in tiles {
            println!(
                "    {}: {} {}",
                "Tile".dimmed(),
                tile.name,
                format!("[{}]", tile.platforms.join(", ")).dimmed()
            );
        }
    }

    if let Some(sdk) = &descriptor.sdk_version {
        let mut parts = Vec::new();
        if let Some(device) = &sdk.device_api {
            parts.push(format!("device {}", device));
        }
        if let Some(companion) = &sdk.companion_api {
            parts.push(format!("companion {}", companion));
        }
        println!("    {}: {}", "API".dimmed(), parts.join(", "));
    }
}

//! `bundle-manifest` is the manifest stage CLI binary.

use bundle_manifest::handlers::{self, EmitOptions};
use bundle_manifest::{Cli, Command, ManifestError, ManifestResult};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &ManifestError) {
    println!();
    match e {
        ManifestError::InvalidBundleTag(tag_err) => {
            println!(
                "  {} Invalid bundle tag on {}",
                "error".bright_red().bold(),
                tag_err.file.bright_white()
            );
            println!();
            for issue in &tag_err.issues {
                println!(
                    "    {} → {}",
                    format!("error[{}]", issue.code).bright_red(),
                    issue.location
                );
                println!("      {}", issue.details);
            }
            println!();
            println!(
                "    {}: Run {} for every issue in the listing",
                "hint".bright_blue().bold(),
                "bundle-manifest validate".bright_white()
            );
        }
        ManifestError::DuplicateComponent {
            slot,
            file,
            existing,
        } => {
            println!(
                "  {} Duplicate {} component bundles",
                "error".bright_red().bold(),
                slot.bright_white()
            );
            println!();
            println!("    {}: {}", "Registered".dimmed(), existing);
            println!("    {}: {}", "Duplicate".dimmed(), file);
        }
        ManifestError::MixedComponentType { file } => {
            println!(
                "  {} Cannot bundle mixed native and JS device components",
                "error".bright_red().bold()
            );
            println!();
            println!("    {}: {}", "Conflicting".dimmed(), file);
        }
        ManifestError::VersionResolution { version } => {
            println!(
                "  {} No API versions known for toolchain {}",
                "error".bright_red().bold(),
                version.bright_white()
            );
            println!();
            println!(
                "    {}: Pass a table with {}",
                "hint".bright_blue().bold(),
                "--api-versions".bright_white()
            );
        }
        // For all other errors, use a consistent styled format
        _ => {
            let msg = e.to_string();
            if let Some((prefix, rest)) = msg.split_once(": ")
                && (prefix.len() < 30 && !prefix.contains(' ') || prefix.ends_with("error"))
            {
                println!(
                    "  {} {}",
                    format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                        .bright_red()
                        .bold(),
                    rest.dimmed()
                );
            } else {
                println!("  {} {}", "error".bright_red().bold(), msg);
            }
        }
    }
    println!();
}

/// Install a `fmt` subscriber when `RUST_LOG` is set; otherwise events are dropped.
fn init_tracing() {
    let Some(directives) = std::env::var("RUST_LOG").ok().filter(|s| !s.is_empty()) else {
        return;
    };

    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("ignoring invalid RUST_LOG ({}), using `info`", err);
        EnvFilter::new("info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> ManifestResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Emit {
            project,
            artifacts,
            capabilities,
            api_versions,
            build_id,
            dry_run,
            json,
            verbose,
        } => {
            handlers::emit_bundle_manifest(EmitOptions {
                project,
                artifacts,
                capabilities,
                api_versions,
                build_id,
                dry_run,
                json,
                verbose,
            })
            .await
        }
        Command::Validate {
            artifacts,
            strict,
            json,
            quiet,
        } => handlers::validate_bundle_tags(artifacts, strict, json, quiet).await,
    }
}

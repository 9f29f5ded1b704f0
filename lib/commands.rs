//! CLI command definitions.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const EMIT_EXAMPLES: &str = "\
Examples:
  bundle-manifest emit                                 Use project.json and artifacts.json
  bundle-manifest emit --api-versions api.json         Resolve sdkVersion from a table
  bundle-manifest emit --capabilities devices.json     Attach device capabilities
  bundle-manifest emit --build-id 0x00000000deadbeef   Fix the build identifier
  bundle-manifest emit --dry-run --json                Print the manifest without writing it";

const VALIDATE_EXAMPLES: &str = "\
Examples:
  bundle-manifest validate                             Check tags in artifacts.json
  bundle-manifest validate --artifacts out/list.json   Check a specific listing
  bundle-manifest validate --strict                    Treat warnings as errors
  bundle-manifest validate --json                      JSON output for parsing";

const CLI_EXAMPLES: &str = "\
Examples:
  bundle-manifest validate                             Check bundle tags first
  bundle-manifest emit                                 Write manifest.json

Set RUST_LOG=debug to trace every ingested artifact.";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Bundle manifest CLI - Generate package manifests from bundle artifacts.
#[derive(Debug, Parser)]
#[command(name = "bundle-manifest", author, version, styles=styles())]
#[command(
    about = "Generate the package manifest for a build",
    after_help = CLI_EXAMPLES
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate bundle artifacts and write manifest.json.
    #[command(after_help = EMIT_EXAMPLES)]
    Emit {
        /// Project configuration file (JSON or TOML).
        #[arg(short, long)]
        project: Option<String>,

        /// Artifact listing file.
        #[arg(short, long)]
        artifacts: Option<String>,

        /// Device capability table (JSON).
        #[arg(long)]
        capabilities: Option<String>,

        /// Toolchain to API version table (JSON).
        #[arg(long)]
        api_versions: Option<String>,

        /// Build identifier (defaults to $BUNDLE_BUILD_ID or a random id).
        #[arg(long)]
        build_id: Option<String>,

        /// Run the stage without writing manifest.json.
        #[arg(long)]
        dry_run: bool,

        /// Print the manifest as JSON.
        #[arg(long)]
        json: bool,

        /// List every ingested artifact.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate the bundle tags in an artifact listing.
    #[command(after_help = VALIDATE_EXAMPLES)]
    Validate {
        /// Artifact listing file.
        #[arg(short, long)]
        artifacts: Option<String>,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Show only errors, no details.
        #[arg(short, long)]
        quiet: bool,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Help output styles.
///
/// Section headers are blue, flags green and value placeholders magenta so
/// file arguments stand out from switches.
pub fn styles() -> Styles {
    let bold = |color| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    let plain = |color| Style::new().fg_color(Some(Color::Ansi(color)));

    Styles::styled()
        .header(bold(AnsiColor::BrightBlue).underline())
        .usage(bold(AnsiColor::BrightBlue))
        .literal(plain(AnsiColor::BrightGreen))
        .placeholder(plain(AnsiColor::Magenta))
        .error(bold(AnsiColor::BrightRed))
        .invalid(bold(AnsiColor::Yellow))
        .valid(bold(AnsiColor::BrightGreen))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

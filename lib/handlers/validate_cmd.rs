//! Bundle tag validation command handler.

use crate::artifact::Artifact;
use crate::error::ManifestResult;
use crate::validate::{ValidationIssue, ValidationResult, inspect_bundle_tag};
use colored::Colorize;

use super::common::load_artifacts;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Inspect every bundle tag in an artifact listing.
pub async fn validate_bundle_tags(
    artifacts: Option<String>,
    strict: bool,
    json_output: bool,
    quiet: bool,
) -> ManifestResult<()> {
    let (listing, artifacts) = load_artifacts(artifacts).await?;
    let (tagged, result) = inspect_artifacts(&artifacts);
    let listing = listing.display().to_string();

    if json_output {
        output_json(&result, &listing, tagged)?;
        return check_exit_status(&result, strict);
    }

    if quiet {
        output_quiet(&result);
    } else {
        output_full(&result, strict, &listing, tagged);
    }

    check_exit_status(&result, strict)
}

/// Inspect the tag of every tagged artifact, returning the tag count and all issues.
pub fn inspect_artifacts(artifacts: &[Artifact]) -> (usize, ValidationResult) {
    let mut result = ValidationResult::default();
    let mut tagged = 0;

    for artifact in artifacts {
        if let Some(raw) = &artifact.bundle {
            tagged += 1;
            result.merge(inspect_bundle_tag(raw, &artifact.path));
        }
    }

    (tagged, result)
}

/// Output validation result as JSON.
fn output_json(result: &ValidationResult, listing: &str, tagged: usize) -> ManifestResult<()> {
    let output = serde_json::json!({
        "artifacts": listing,
        "tagged": tagged,
        "valid": result.is_valid(),
        "strict_valid": result.is_strict_valid(),
        "errors": result.errors,
        "warnings": result.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Output validation result in quiet mode.
fn output_quiet(result: &ValidationResult) {
    for error in &result.errors {
        println!(
            "  {}: {}: {}",
            format!("error[{}]", error.code).bright_red(),
            error.location,
            error.details
        );
    }
}

/// Output validation result in full format, grouped by code.
fn output_full(result: &ValidationResult, strict: bool, listing: &str, tagged: usize) {
    println!(
        "  Validating {} bundle tags in {}\n",
        tagged,
        listing.bold()
    );

    let warning_severity = if strict { "error" } else { "warning" };
    let mut all_issues: Vec<(&str, &ValidationIssue)> = result
        .errors
        .iter()
        .map(|e| ("error", e))
        .chain(result.warnings.iter().map(|w| (warning_severity, w)))
        .collect();
    all_issues.sort_by_key(|(_, issue)| issue.code.to_string());

    for (severity, issue) in &all_issues {
        let label = if *severity == "error" {
            format!("error[{}]", issue.code).bright_red().bold()
        } else {
            format!("warning[{}]", issue.code).bright_yellow().bold()
        };
        println!("  {}: → {}", label, issue.location.bold());

        if let Some(help) = &issue.help {
            println!("      {} {}", "├─".dimmed(), issue.details.dimmed());
            println!(
                "      {} {}: {}",
                "└─".dimmed(),
                "help".bright_green().dimmed(),
                help.dimmed()
            );
        } else {
            println!("      {} {}", "└─".dimmed(), issue.details.dimmed());
        }

        println!();
    }

    let error_count = result.errors.len();
    let warning_count = result.warnings.len();

    if strict {
        let total = error_count + warning_count;
        if total > 0 {
            println!(
                "  {} {} (strict mode)",
                "✗".bright_red(),
                plural(total, "error")
            );
        } else {
            println!("  {} valid", "✓".bright_green());
        }
    } else if error_count > 0 {
        let summary = if warning_count > 0 {
            format!(
                "{}, {}",
                plural(error_count, "error"),
                plural(warning_count, "warning")
            )
        } else {
            plural(error_count, "error")
        };
        println!("  {} {}", "✗".bright_red(), summary);
    } else if warning_count > 0 {
        println!(
            "  {} valid ({})",
            "✓".bright_green(),
            plural(warning_count, "warning")
        );
    } else {
        println!("  {} valid", "✓".bright_green());
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Check if we should exit with error status.
fn check_exit_status(result: &ValidationResult, strict: bool) -> ManifestResult<()> {
    if strict {
        if !result.is_strict_valid() {
            std::process::exit(1);
        }
    } else if !result.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleTag;
    use serde_json::json;

    #[test]
    fn test_inspect_collects_every_artifact() {
        let artifacts = vec![
            Artifact::new("device-ionic.zip").with_bundle(&BundleTag::device("ionic", &["ionic"])),
            Artifact::new("broken.zip").with_raw_bundle(json!({ "type": "watch" })),
            Artifact::new("odd.zip").with_raw_bundle(json!({
                "type": "device",
                "family": "ionic",
                "platform": ["ionic", "ionic"],
                "isNative": false
            })),
            Artifact::new("resources/icon.png"),
        ];

        let (tagged, result) = inspect_artifacts(&artifacts);
        assert_eq!(tagged, 3);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].location.starts_with("broken.zip"));
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_inspect_untagged_listing_is_valid() {
        let (tagged, result) = inspect_artifacts(&[Artifact::new("a.txt")]);
        assert_eq!(tagged, 0);
        assert!(result.is_strict_valid());
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "error"), "1 error");
        assert_eq!(plural(3, "warning"), "3 warnings");
    }
}

//! Validation result types.

use serde::Serialize;
use thiserror::Error;

use super::codes::ValidationCode;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation result with categorized issues.
#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    /// Validation errors (always fail).
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (fail with --strict).
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Error/warning code.
    pub code: ValidationCode,

    /// Short description (e.g., "missing required field").
    pub message: String,

    /// Location of the offending field (e.g., "device-ionic.zip:bundle.family").
    pub location: String,

    /// Detailed explanation.
    pub details: String,

    /// Optional help suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A bundle tag that failed validation.
///
/// Carries the artifact it was attached to and every violated field.
#[derive(Debug, Clone, Error)]
#[error("invalid bundle tag on {file}: {}", summarize(.issues))]
pub struct BundleTagError {
    /// The artifact the tag was attached to.
    pub file: String,

    /// Every error found in the tag.
    pub issues: Vec<ValidationIssue>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidationResult {
    /// Returns true if there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are no errors or warnings.
    pub fn is_strict_valid(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Append the issues of another result.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.details.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

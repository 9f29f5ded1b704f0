//! Bundle tag validation error and warning codes.

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation error codes.
///
/// These represent problems that always reject the bundle tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// E001: The attached bundle tag is not a JSON object.
    #[serde(rename = "E001")]
    TagNotAnObject,

    /// E002: The `type` discriminant is missing.
    #[serde(rename = "E002")]
    MissingBundleType,

    /// E003: The `type` discriminant is not `device` or `companion`.
    #[serde(rename = "E003")]
    UnknownBundleType,

    /// E004: A required field is missing.
    #[serde(rename = "E004")]
    MissingRequiredField,

    /// E005: A field has the wrong JSON type.
    #[serde(rename = "E005")]
    InvalidFieldType,

    /// E006: Device family is an empty string.
    #[serde(rename = "E006")]
    EmptyFamily,
}

/// Validation warning codes.
///
/// These don't reject the tag but indicate input the stage ignores or rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// W001: Field is not part of the tag shape and is ignored.
    #[serde(rename = "W001")]
    UnknownField,

    /// W002: Platform listed more than once; later entries are dropped.
    #[serde(rename = "W002")]
    DuplicatePlatform,
}

/// A validation code that can be either an error or warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationCode {
    /// An error code.
    Error(ErrorCode),
    /// A warning code.
    Warning(WarningCode),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::TagNotAnObject => "E001",
            ErrorCode::MissingBundleType => "E002",
            ErrorCode::UnknownBundleType => "E003",
            ErrorCode::MissingRequiredField => "E004",
            ErrorCode::InvalidFieldType => "E005",
            ErrorCode::EmptyFamily => "E006",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::UnknownField => "W001",
            WarningCode::DuplicatePlatform => "W002",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::Error(e) => write!(f, "{}", e),
            ValidationCode::Warning(w) => write!(f, "{}", w),
        }
    }
}

impl From<ErrorCode> for ValidationCode {
    fn from(code: ErrorCode) -> Self {
        ValidationCode::Error(code)
    }
}

impl From<WarningCode> for ValidationCode {
    fn from(code: WarningCode) -> Self {
        ValidationCode::Warning(code)
    }
}

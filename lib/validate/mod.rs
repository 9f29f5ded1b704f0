//! Bundle tag validation.

mod codes;
mod result;
mod tag;


//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use codes::{ErrorCode, ValidationCode, WarningCode};
pub use result::{BundleTagError, ValidationIssue, ValidationResult};
pub use tag::{inspect_bundle_tag, validate_bundle_tag};

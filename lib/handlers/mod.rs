//! Command handlers.

mod common;
mod emit_cmd;
mod validate_cmd;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use common::{load_api_versions, load_artifacts, load_capabilities, load_project};
pub use emit_cmd::{EmitOptions, emit_bundle_manifest};
pub use validate_cmd::{inspect_artifacts, validate_bundle_tags};

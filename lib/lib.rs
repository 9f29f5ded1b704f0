//! `bundle-manifest` library.
//!
//! The manifest stage of a bundle build pipeline: it consumes the artifacts
//! produced by earlier stages, validates the bundle tags attached to them and
//! emits the package's `manifest.json`.

pub mod aggregate;
pub mod artifact;
pub mod bundle;
pub mod commands;
pub mod compat;
pub mod components;
pub mod constants;
pub mod context;
pub mod emit;
pub mod error;
pub mod handlers;
pub mod project;
pub mod source_map;
pub mod stage;
pub mod tiles;
pub mod validate;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use aggregate::*;
pub use artifact::*;
pub use bundle::*;
pub use commands::*;
pub use compat::*;
pub use components::*;
pub use constants::*;
pub use context::*;
pub use emit::*;
pub use error::*;
pub use project::*;
pub use source_map::*;
pub use stage::*;
pub use tiles::*;
pub use validate::*;

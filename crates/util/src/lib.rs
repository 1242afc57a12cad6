//! rest-resource-util - helpers shared by the rest-resource marshaling layer
//!
//! This crate provides the name inflection used to derive root elements and
//! the blank/present checks used to decide what goes on the wire.

pub mod inflect;
pub mod presence;

// Re-exports for convenience
pub use inflect::{demodulize, pluralize, underscore};
pub use presence::{is_blank, is_present};

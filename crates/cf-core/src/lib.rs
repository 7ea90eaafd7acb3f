//! cf-core: shared errors, IDs, artifact and property types, configuration.
//!
//! This crate is the foundational dependency for all other cf-* crates.

pub mod artifact;
pub mod config;
pub mod error;
pub mod ids;
pub mod property;

// Re-export the most commonly used items at the crate root.
pub use artifact::{Artifact, ArtifactMap, ArtifactType, ArtifactTypeMap};
pub use error::{Error, ErrorCategory, Result};
pub use ids::RunId;
pub use property::{ExecProperties, PropertyType, PropertyTypeMap, PropertyValue};

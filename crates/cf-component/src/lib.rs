//! # cf-component
//!
//! Container component model for pipeline steps.
//!
//! - **[`Placeholder`] / [`CommandArg`]** -- typed references to inputs and
//!   outputs embedded in a command-line template.
//! - **[`create_container_component`]** -- validates a declaration and
//!   produces a [`ContainerComponent`] carrying an [`ExecutorSpec`] (image +
//!   command template).
//! - **[`ResolutionContext`]** -- substitutes placeholders with bound artifact
//!   URIs and values when a component runs.

pub mod component;
pub mod placeholder;
pub mod resolve;
pub mod translator;

pub use component::{ComponentSpec, ContainerComponent, ExecutorSpec};
pub use placeholder::{CommandArg, Placeholder, PlaceholderKind};
pub use resolve::ResolutionContext;
pub use translator::create_container_component;

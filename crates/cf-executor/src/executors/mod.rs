//! Built-in executor implementations.

mod container;
mod empty;

pub use container::{ContainerExecutor, ContainerRuntime};
pub use empty::EmptyExecutor;

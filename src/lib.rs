//! componentforge - container components for ML pipelines
//!
//! This library crate exposes the binary's building blocks for integration
//! testing.

pub mod bindings;
pub mod config;

//! # cf-kfp
//!
//! Adapter for externally authored container component documents.
//!
//! A document declares `inputs`, `outputs` and an
//! `implementation.container` section whose `command` and `args` entries are
//! either literal strings or single-field placeholder references
//! (`inputValue`, `inputPath`, `inputUri`, `outputPath`, `outputUri`).
//!
//! - [`convert_target_fields_to_kv_pair`] -- rewrites bare strings into
//!   `{stringValue: ...}` wrappers so every entry has the same shape.
//! - [`command_line_argument_type`] / [`CommandLineArgument`] -- one-of
//!   decoding of a wrapper.
//! - [`load_component_yaml`] / [`load_component_str`] -- build a
//!   [`cf_component::ContainerComponent`] through the translator.

pub mod argument;
pub mod document;
pub mod loader;
pub mod normalize;

pub use argument::{command_line_argument_type, ArgumentFields, ArgumentType, CommandLineArgument};
pub use document::ComponentDocument;
pub use loader::{
    component_from_value, load_component_str, load_component_yaml, normalized_document,
    parse_document,
};
pub use normalize::convert_target_fields_to_kv_pair;

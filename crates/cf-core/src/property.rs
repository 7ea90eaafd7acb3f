//! Execution properties: primitive values known at pipeline-construction time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of an execution property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Int,
    Float,
    String,
    Bool,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// A primitive execution property value.
///
/// Serialized untagged so that `{"epochs": 10, "lr": 0.1}` maps directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// The type tag of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Int(_) => PropertyType::Int,
            Self::Float(_) => PropertyType::Float,
            Self::String(_) => PropertyType::String,
            Self::Bool(_) => PropertyType::Bool,
        }
    }

    /// Parse a command-line style `value` according to `ty`.
    pub fn parse_as(ty: PropertyType, raw: &str) -> Option<Self> {
        match ty {
            PropertyType::Int => raw.parse().ok().map(Self::Int),
            PropertyType::Float => raw.parse().ok().map(Self::Float),
            PropertyType::Bool => raw.parse().ok().map(Self::Bool),
            PropertyType::String => Some(Self::String(raw.to_string())),
        }
    }
}

/// Rendered as it would appear on a command line.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Declared parameters: name to property type.
pub type PropertyTypeMap = BTreeMap<String, PropertyType>;

/// Run-time execution properties: name to value.
pub type ExecProperties = BTreeMap<String, PropertyValue>;

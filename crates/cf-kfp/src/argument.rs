//! One-of command-line argument wrappers.
//!
//! After normalization every entry of `command` / `args` is an object with
//! exactly one recognized field set. [`ArgumentFields`] is the raw decoded
//! object; [`CommandLineArgument`] is the validated sum type.

use std::fmt;

use cf_component::{CommandArg, Placeholder};
use cf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logical type tag of a wrapper's populated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    StringValue,
    InputValue,
    InputPath,
    InputUri,
    OutputPath,
    OutputUri,
}

impl ArgumentType {
    /// Every recognized field, in wire spelling order.
    pub const ALL: [ArgumentType; 6] = [
        Self::StringValue,
        Self::InputValue,
        Self::InputPath,
        Self::InputUri,
        Self::OutputPath,
        Self::OutputUri,
    ];

    /// The field name as it appears in a document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StringValue => "stringValue",
            Self::InputValue => "inputValue",
            Self::InputPath => "inputPath",
            Self::InputUri => "inputUri",
            Self::OutputPath => "outputPath",
            Self::OutputUri => "outputUri",
        }
    }

    /// Look up a field name.
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == field)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for ArgumentType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A wrapper object as it appears in a document, before the one-of rule is
/// enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArgumentFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_uri: Option<String>,
}

impl ArgumentFields {
    /// Decode a wrapper object found at `location` (e.g. `args[2]`).
    ///
    /// Unknown field names and non-string field values are rejected here;
    /// the one-of rule is checked by [`command_line_argument_type`].
    pub fn from_value(value: &Value, location: &str) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::malformed_argument(
                location,
                format!("expected a string or a single-field object, found {value}"),
            ));
        };

        let mut fields = Self::default();
        for (key, field_value) in map {
            let ty = ArgumentType::from_field(key).ok_or_else(|| {
                Error::malformed_argument(location, format!("unknown field '{key}'"))
            })?;
            let Value::String(s) = field_value else {
                return Err(Error::malformed_argument(
                    location,
                    format!("field '{key}' must be a string, found {field_value}"),
                ));
            };
            *fields.slot_mut(ty) = Some(s.clone());
        }
        Ok(fields)
    }

    fn slot(&self, ty: ArgumentType) -> &Option<String> {
        match ty {
            ArgumentType::StringValue => &self.string_value,
            ArgumentType::InputValue => &self.input_value,
            ArgumentType::InputPath => &self.input_path,
            ArgumentType::InputUri => &self.input_uri,
            ArgumentType::OutputPath => &self.output_path,
            ArgumentType::OutputUri => &self.output_uri,
        }
    }

    fn slot_mut(&mut self, ty: ArgumentType) -> &mut Option<String> {
        match ty {
            ArgumentType::StringValue => &mut self.string_value,
            ArgumentType::InputValue => &mut self.input_value,
            ArgumentType::InputPath => &mut self.input_path,
            ArgumentType::InputUri => &mut self.input_uri,
            ArgumentType::OutputPath => &mut self.output_path,
            ArgumentType::OutputUri => &mut self.output_uri,
        }
    }

    fn populated(&self) -> Vec<ArgumentType> {
        ArgumentType::ALL
            .into_iter()
            .filter(|t| self.slot(*t).is_some())
            .collect()
    }
}

/// Return the type tag of the single populated field of `wrapper`.
///
/// # Errors
///
/// Returns [`Error::MalformedArgument`] if no field or more than one field is
/// set.
pub fn command_line_argument_type(wrapper: &ArgumentFields) -> Result<ArgumentType> {
    match wrapper.populated().as_slice() {
        [ty] => Ok(*ty),
        [] => Err(Error::malformed_argument(
            "wrapper",
            "no field is set; exactly one is required",
        )),
        many => Err(Error::malformed_argument(
            "wrapper",
            format!(
                "{} fields are set ({}); exactly one is required",
                many.len(),
                many.iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}

/// A validated command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLineArgument {
    Literal(String),
    InputValue(String),
    InputPath(String),
    InputUri(String),
    OutputPath(String),
    OutputUri(String),
}

impl CommandLineArgument {
    /// Decode and validate the wrapper found at `location`.
    pub fn from_value(value: &Value, location: &str) -> Result<Self> {
        let fields = ArgumentFields::from_value(value, location)?;
        Self::try_from(fields).map_err(|e| match e {
            Error::MalformedArgument { message, .. } => Error::malformed_argument(location, message),
            other => other,
        })
    }

    pub fn argument_type(&self) -> ArgumentType {
        match self {
            Self::Literal(_) => ArgumentType::StringValue,
            Self::InputValue(_) => ArgumentType::InputValue,
            Self::InputPath(_) => ArgumentType::InputPath,
            Self::InputUri(_) => ArgumentType::InputUri,
            Self::OutputPath(_) => ArgumentType::OutputPath,
            Self::OutputUri(_) => ArgumentType::OutputUri,
        }
    }

    /// Convert into a command template element.
    ///
    /// Paths and URIs are the same thing for a container component: the
    /// location of the artifact payload.
    pub fn into_command_arg(self) -> Result<CommandArg> {
        Ok(match self {
            Self::Literal(s) => CommandArg::Literal(s),
            Self::InputValue(name) => Placeholder::input_value(name)?.into(),
            Self::InputPath(name) | Self::InputUri(name) => Placeholder::input_uri(name)?.into(),
            Self::OutputPath(name) | Self::OutputUri(name) => {
                Placeholder::output_uri(name)?.into()
            }
        })
    }
}

impl TryFrom<ArgumentFields> for CommandLineArgument {
    type Error = Error;

    fn try_from(mut fields: ArgumentFields) -> Result<Self> {
        let ty = command_line_argument_type(&fields)?;
        let value = fields.slot_mut(ty).take().unwrap_or_default();
        Ok(match ty {
            ArgumentType::StringValue => Self::Literal(value),
            ArgumentType::InputValue => Self::InputValue(value),
            ArgumentType::InputPath => Self::InputPath(value),
            ArgumentType::InputUri => Self::InputUri(value),
            ArgumentType::OutputPath => Self::OutputPath(value),
            ArgumentType::OutputUri => Self::OutputUri(value),
        })
    }
}

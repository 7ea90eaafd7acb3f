//! Placeholders embedded in a component's command-line template.
//!
//! A [`CommandArg`] is either a literal string or a [`Placeholder`] that
//! stands for an input's value, an input's URI, or an output's URI. The
//! placeholder is substituted only when the component actually runs.

use cf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a placeholder resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// The materialized value of a named input (or parameter).
    InputValue,
    /// The URI of a named input artifact.
    InputUri,
    /// The URI of a named output artifact.
    OutputUri,
}

impl PlaceholderKind {
    /// Whether the kind references an input slot.
    pub fn is_input(self) -> bool {
        matches!(self, Self::InputValue | Self::InputUri)
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputValue => write!(f, "InputValue"),
            Self::InputUri => write!(f, "InputUri"),
            Self::OutputUri => write!(f, "OutputUri"),
        }
    }
}

/// A typed reference to a declared input or output.
///
/// Equality is structural: two placeholders are equal when kind and name are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlaceholder")]
pub struct Placeholder {
    kind: PlaceholderKind,
    name: String,
}

impl Placeholder {
    /// Create a placeholder, validating the referenced name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` is empty or malformed.
    pub fn new(kind: PlaceholderKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name).map_err(|reason| {
            Error::validation(format!("{kind} placeholder name '{name}' {reason}"))
        })?;
        Ok(Self { kind, name })
    }

    /// `InputValue(name)`.
    pub fn input_value(name: impl Into<String>) -> Result<Self> {
        Self::new(PlaceholderKind::InputValue, name)
    }

    /// `InputUri(name)`.
    pub fn input_uri(name: impl Into<String>) -> Result<Self> {
        Self::new(PlaceholderKind::InputUri, name)
    }

    /// `OutputUri(name)`.
    pub fn output_uri(name: impl Into<String>) -> Result<Self> {
        Self::new(PlaceholderKind::OutputUri, name)
    }

    pub fn kind(&self) -> PlaceholderKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.kind, self.name)
    }
}

#[derive(Deserialize)]
struct RawPlaceholder {
    kind: PlaceholderKind,
    name: String,
}

impl TryFrom<RawPlaceholder> for Placeholder {
    type Error = Error;

    fn try_from(raw: RawPlaceholder) -> Result<Self> {
        Placeholder::new(raw.kind, raw.name)
    }
}

/// Check that `name` can identify an input, output or parameter.
///
/// Names are non-empty, carry no surrounding whitespace, and contain only
/// ASCII alphanumerics, `_`, `-`, `.` and inner spaces.
pub fn validate_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("is empty");
    }
    if name.trim() != name {
        return Err("has leading or trailing whitespace");
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '));
    if !valid {
        return Err("contains characters other than letters, digits, '_', '-', '.' and ' '");
    }
    Ok(())
}

/// One element of a command-line template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandArg {
    /// Passed through unchanged.
    Literal(String),
    /// Substituted at run time.
    Placeholder(Placeholder),
}

impl CommandArg {
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    /// The placeholder, if this argument is one.
    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Literal(_) => None,
        }
    }
}

impl From<&str> for CommandArg {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for CommandArg {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Placeholder> for CommandArg {
    fn from(p: Placeholder) -> Self {
        Self::Placeholder(p)
    }
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Placeholder(p) => write!(f, "{{{{{p}}}}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(
            Placeholder::input_value("a").unwrap().kind(),
            PlaceholderKind::InputValue
        );
        assert_eq!(
            Placeholder::input_uri("a").unwrap().kind(),
            PlaceholderKind::InputUri
        );
        assert_eq!(
            Placeholder::output_uri("a").unwrap().kind(),
            PlaceholderKind::OutputUri
        );
    }

    #[test]
    fn equality_is_kind_and_name() {
        let a = Placeholder::input_uri("data").unwrap();
        assert_eq!(a, Placeholder::input_uri("data").unwrap());
        assert_ne!(a, Placeholder::input_value("data").unwrap());
        assert_ne!(a, Placeholder::input_uri("other").unwrap());
    }

    #[test]
    fn empty_name_rejected() {
        let err = Placeholder::output_uri("").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("is empty"), "got: {err}");
    }

    #[test]
    fn malformed_names_rejected() {
        for bad in [" lead", "trail ", "new\nline", "curly{}", "tab\there"] {
            assert!(Placeholder::input_value(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn well_formed_names_accepted() {
        for good in ["input1", "Training data", "model.v2", "out-dir", "_x"] {
            assert!(Placeholder::input_value(good).is_ok(), "rejected {good:?}");
        }
    }

    #[test]
    fn command_arg_serde_shape() {
        let cmd = vec![
            CommandArg::literal("--epochs"),
            Placeholder::input_value("epochs").unwrap().into(),
        ];
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["--epochs", {"kind": "input_value", "name": "epochs"}])
        );
        let back: Vec<CommandArg> = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn deserialization_validates_name() {
        let result: std::result::Result<CommandArg, _> =
            serde_json::from_value(serde_json::json!({"kind": "input_uri", "name": ""}));
        assert!(result.is_err());
    }

    #[test]
    fn display_marks_placeholders() {
        let arg: CommandArg = Placeholder::output_uri("model").unwrap().into();
        assert_eq!(arg.to_string(), "{{OutputUri('model')}}");
        assert_eq!(CommandArg::literal("train").to_string(), "train");
    }
}

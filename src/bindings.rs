//! Command-line bindings for a component's inputs, outputs and parameters.
//!
//! Each binding is written `name=value`. Names are checked against the
//! component's declared slots so typos fail before anything runs.

use anyhow::{bail, Context, Result};
use cf_component::ContainerComponent;
use cf_core::{Artifact, ArtifactMap, ExecProperties, PropertyValue};

/// Artifacts and properties bound to one component run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    pub inputs: ArtifactMap,
    pub outputs: ArtifactMap,
    pub exec_properties: ExecProperties,
}

/// Raw `name=value` arguments as collected by the CLI.
#[derive(Debug, Clone, Default)]
pub struct BindingArgs<'a> {
    /// `name=uri` for input artifacts.
    pub inputs: &'a [String],
    /// `name=text` for inputs passed inline.
    pub values: &'a [String],
    /// `name=uri` for output artifacts.
    pub outputs: &'a [String],
    /// `name=value` for execution properties.
    pub params: &'a [String],
}

/// Split `name=value` at the first `=`.
pub fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected NAME=VALUE, got '{raw}'"),
    }
}

impl Bindings {
    /// Build bindings for `component`.
    ///
    /// Input and output artifacts take the declared slot type. Parameters
    /// declared by the component are parsed as their declared type; other
    /// parameters are kept as strings.
    pub fn from_args(component: &ContainerComponent, args: &BindingArgs<'_>) -> Result<Self> {
        let spec = component.spec();
        let mut bindings = Self::default();

        for raw in args.inputs {
            let (name, uri) = parse_pair(raw).context("invalid --input")?;
            let Some(ty) = spec.inputs.get(name) else {
                bail!("component '{}' has no input named '{name}'", spec.name);
            };
            bindings
                .inputs
                .entry(name.to_string())
                .or_default()
                .push(Artifact::new(ty, uri));
        }

        for raw in args.values {
            let (name, text) = parse_pair(raw).context("invalid --value")?;
            let Some(ty) = spec.inputs.get(name) else {
                bail!("component '{}' has no input named '{name}'", spec.name);
            };
            bindings
                .inputs
                .entry(name.to_string())
                .or_default()
                .push(Artifact::new(ty, "").with_value(text));
        }

        for raw in args.outputs {
            let (name, uri) = parse_pair(raw).context("invalid --output")?;
            let Some(ty) = spec.outputs.get(name) else {
                bail!("component '{}' has no output named '{name}'", spec.name);
            };
            bindings
                .outputs
                .entry(name.to_string())
                .or_default()
                .push(Artifact::new(ty, uri));
        }

        for raw in args.params {
            let (name, value) = parse_pair(raw).context("invalid --param")?;
            let value = match spec.parameters.get(name) {
                Some(&ty) => PropertyValue::parse_as(ty, value).with_context(|| {
                    format!("parameter '{name}' expects {ty}, got '{value}'")
                })?,
                None => PropertyValue::String(value.to_string()),
            };
            bindings.exec_properties.insert(name.to_string(), value);
        }

        Ok(bindings)
    }
}

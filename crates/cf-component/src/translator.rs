//! Translation of a declared component into a validated [`ContainerComponent`].

use std::collections::HashMap;

use cf_core::{ArtifactTypeMap, Error, PropertyTypeMap, Result};

use crate::component::{ComponentSpec, ContainerComponent, ExecutorSpec};
use crate::placeholder::{validate_name, CommandArg, Placeholder, PlaceholderKind};

/// Build a container component from its image, command template and
/// declared inputs, outputs and parameters.
///
/// The command template is kept in order with placeholders unresolved; they
/// are substituted only when the component runs.
///
/// # Errors
///
/// - [`Error::Validation`] if the name or image is empty, or a declared name
///   is malformed.
/// - [`Error::DuplicateName`] if a name is declared more than once across
///   inputs, outputs and parameters.
/// - [`Error::UnresolvedPlaceholder`] if a placeholder references a name
///   that is not declared for its kind.
pub fn create_container_component(
    name: impl Into<String>,
    image: impl Into<String>,
    command: Vec<CommandArg>,
    inputs: ArtifactTypeMap,
    outputs: ArtifactTypeMap,
    parameters: PropertyTypeMap,
) -> Result<ContainerComponent> {
    let name = name.into();
    let image = image.into();

    if name.trim().is_empty() {
        return Err(Error::validation("component name is empty"));
    }
    if image.trim().is_empty() {
        return Err(Error::validation(format!(
            "component '{name}' has an empty image reference"
        )));
    }

    check_declared_names(&inputs, &outputs, &parameters)?;

    for arg in &command {
        if let CommandArg::Placeholder(p) = arg {
            resolve_reference(p, &inputs, &outputs, &parameters)?;
        }
    }

    tracing::debug!(
        component = %name,
        image = %image,
        args = command.len(),
        "Built container component"
    );

    Ok(ContainerComponent::from_parts(
        ComponentSpec {
            name,
            inputs,
            outputs,
            parameters,
        },
        ExecutorSpec { image, command },
    ))
}

/// Every declared name must be well formed and unique across all three maps.
fn check_declared_names(
    inputs: &ArtifactTypeMap,
    outputs: &ArtifactTypeMap,
    parameters: &PropertyTypeMap,
) -> Result<()> {
    let mut seen: HashMap<&str, &'static str> = HashMap::new();
    let declared = inputs
        .keys()
        .map(|k| (k.as_str(), "inputs"))
        .chain(outputs.keys().map(|k| (k.as_str(), "outputs")))
        .chain(parameters.keys().map(|k| (k.as_str(), "parameters")));

    for (key, section) in declared {
        validate_name(key)
            .map_err(|reason| Error::validation(format!("{section} name '{key}' {reason}")))?;
        if let Some(first) = seen.insert(key, section) {
            return Err(Error::DuplicateName {
                name: key.to_string(),
                first,
                second: section,
            });
        }
    }
    Ok(())
}

fn resolve_reference(
    p: &Placeholder,
    inputs: &ArtifactTypeMap,
    outputs: &ArtifactTypeMap,
    parameters: &PropertyTypeMap,
) -> Result<()> {
    let (found, expected) = match p.kind() {
        PlaceholderKind::InputValue => (
            inputs.contains_key(p.name()) || parameters.contains_key(p.name()),
            "input or parameter",
        ),
        PlaceholderKind::InputUri => (inputs.contains_key(p.name()), "input"),
        PlaceholderKind::OutputUri => (outputs.contains_key(p.name()), "output"),
    };

    if found {
        Ok(())
    } else {
        Err(Error::UnresolvedPlaceholder {
            kind: p.kind().to_string(),
            name: p.name().to_string(),
            expected,
        })
    }
}

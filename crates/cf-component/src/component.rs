//! Component descriptors produced by the translator.

use cf_core::{ArtifactTypeMap, PropertyTypeMap};
use serde::{Deserialize, Serialize};

use crate::placeholder::{CommandArg, Placeholder};

/// Container-based executor specification: the image to run and the
/// ordered command template, placeholders left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSpec {
    pub image: String,
    pub command: Vec<CommandArg>,
}

impl ExecutorSpec {
    /// Iterate over the placeholders in command order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.command.iter().filter_map(CommandArg::as_placeholder)
    }
}

/// The typed contract of a component: its declared slots and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub inputs: ArtifactTypeMap,
    pub outputs: ArtifactTypeMap,
    /// Execution properties (parameters) and their primitive types.
    pub parameters: PropertyTypeMap,
}

/// An executable container component.
///
/// Only [`create_container_component`](crate::create_container_component)
/// constructs one, so every value has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerComponent {
    spec: ComponentSpec,
    executor_spec: ExecutorSpec,
}

impl ContainerComponent {
    pub(crate) fn from_parts(spec: ComponentSpec, executor_spec: ExecutorSpec) -> Self {
        Self {
            spec,
            executor_spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    pub fn executor_spec(&self) -> &ExecutorSpec {
        &self.executor_spec
    }

    pub fn into_parts(self) -> (ComponentSpec, ExecutorSpec) {
        (self.spec, self.executor_spec)
    }
}

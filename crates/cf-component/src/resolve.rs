//! Run-time substitution of placeholders in a command template.

use cf_core::{Artifact, ArtifactMap, Error, ExecProperties, Result};

use crate::placeholder::{CommandArg, Placeholder, PlaceholderKind};

/// Bindings available when a component runs.
///
/// # Example
///
/// ```
/// use cf_component::{CommandArg, Placeholder, ResolutionContext};
/// use cf_core::{Artifact, ArtifactMap, ArtifactType, ExecProperties};
///
/// let mut outputs = ArtifactMap::new();
/// outputs.insert("model".into(), vec![Artifact::new(&ArtifactType::MODEL, "/out/model")]);
/// let (inputs, props) = (ArtifactMap::new(), ExecProperties::new());
///
/// let ctx = ResolutionContext::new(&inputs, &outputs, &props);
/// let args = ctx
///     .resolve(&[
///         CommandArg::literal("--model"),
///         Placeholder::output_uri("model").unwrap().into(),
///     ])
///     .unwrap();
/// assert_eq!(args, vec!["--model", "/out/model"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    inputs: &'a ArtifactMap,
    outputs: &'a ArtifactMap,
    exec_properties: &'a ExecProperties,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        inputs: &'a ArtifactMap,
        outputs: &'a ArtifactMap,
        exec_properties: &'a ExecProperties,
    ) -> Self {
        Self {
            inputs,
            outputs,
            exec_properties,
        }
    }

    /// Resolve every argument of `command`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] if a placeholder has no binding or an
    /// input value cannot be read.
    pub fn resolve(&self, command: &[CommandArg]) -> Result<Vec<String>> {
        command.iter().map(|arg| self.resolve_arg(arg)).collect()
    }

    /// Resolve a single argument.
    pub fn resolve_arg(&self, arg: &CommandArg) -> Result<String> {
        match arg {
            CommandArg::Literal(s) => Ok(s.clone()),
            CommandArg::Placeholder(p) => self.resolve_placeholder(p),
        }
    }

    fn resolve_placeholder(&self, p: &Placeholder) -> Result<String> {
        match p.kind() {
            PlaceholderKind::InputUri => bound_uri(first_bound(self.inputs, p, "input")?, p),
            PlaceholderKind::OutputUri => bound_uri(first_bound(self.outputs, p, "output")?, p),
            PlaceholderKind::InputValue => {
                if let Some(value) = self.exec_properties.get(p.name()) {
                    return Ok(value.to_string());
                }
                let artifact = first_bound(self.inputs, p, "input")?;
                match artifact.value {
                    Some(ref value) => Ok(value.clone()),
                    None => std::fs::read_to_string(&artifact.uri).map_err(|e| {
                        Error::resolution(
                            p.name(),
                            format!("failed to read value from {}: {e}", artifact.uri),
                        )
                    }),
                }
            }
        }
    }
}

fn bound_uri(artifact: &Artifact, p: &Placeholder) -> Result<String> {
    if artifact.uri.is_empty() {
        return Err(Error::resolution(p.name(), "bound artifact has no URI"));
    }
    Ok(artifact.uri.clone())
}

fn first_bound<'m>(map: &'m ArtifactMap, p: &Placeholder, side: &str) -> Result<&'m Artifact> {
    let artifacts = map
        .get(p.name())
        .ok_or_else(|| Error::resolution(p.name(), format!("no {side} bound for {p}")))?;
    if artifacts.len() > 1 {
        tracing::debug!(
            "{p} has {} bound artifacts; using the first",
            artifacts.len()
        );
    }
    artifacts
        .first()
        .ok_or_else(|| Error::resolution(p.name(), format!("{side} list for {p} is empty")))
}

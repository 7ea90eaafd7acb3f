//! Loading container components from external YAML documents.

use std::path::Path;

use cf_component::{create_container_component, CommandArg, ContainerComponent};
use cf_core::{Error, PropertyTypeMap, Result};
use serde_json::Value;

use crate::argument::CommandLineArgument;
use crate::document::{slot_type_map, ComponentDocument};
use crate::normalize::convert_target_fields_to_kv_pair;

/// Load a container component from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, and a validation error
/// (see [`component_from_value`]) if its contents are not a valid component.
pub fn load_component_yaml(path: &Path) -> Result<ContainerComponent> {
    let contents = std::fs::read_to_string(path)?;
    tracing::info!("Loading component document {}", path.display());
    load_component_str(&contents)
}

/// Load a container component from YAML text.
pub fn load_component_str(yaml: &str) -> Result<ContainerComponent> {
    component_from_value(parse_document(yaml)?)
}

/// Parse YAML text into a generic document tree without normalizing it.
pub fn parse_document(yaml: &str) -> Result<Value> {
    let doc: Value = serde_yaml::from_str(yaml)
        .map_err(|e| Error::malformed(format!("invalid YAML: {e}")))?;
    if !doc.is_object() {
        return Err(Error::malformed("document root must be a mapping"));
    }
    Ok(doc)
}

/// Parse and normalize YAML text; every command/args entry becomes a
/// single-field wrapper.
pub fn normalized_document(yaml: &str) -> Result<Value> {
    let mut doc = parse_document(yaml)?;
    convert_target_fields_to_kv_pair(&mut doc);
    Ok(doc)
}

/// Build a container component from a parsed document tree.
///
/// The tree is normalized first, so both raw and already-normalized
/// documents are accepted. The command template is `command` followed by
/// `args`.
///
/// # Errors
///
/// - [`Error::MalformedDocument`] if `name`, `implementation.container` or
///   its `image` is missing, or a slot type is unsupported.
/// - [`Error::MalformedArgument`] if a wrapper does not have exactly one
///   recognized field.
/// - [`Error::UnresolvedPlaceholder`] / [`Error::DuplicateName`] from the
///   translator.
pub fn component_from_value(mut doc: Value) -> Result<ContainerComponent> {
    convert_target_fields_to_kv_pair(&mut doc);

    let doc: ComponentDocument =
        serde_json::from_value(doc).map_err(|e| Error::malformed(e.to_string()))?;

    let container = doc
        .implementation
        .container
        .ok_or_else(|| Error::malformed("missing implementation.container"))?;

    let image = container
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or_else(|| Error::malformed("missing implementation.container.image"))?;

    let mut command: Vec<CommandArg> =
        Vec::with_capacity(container.command.len() + container.args.len());
    for (section, entries) in [("command", &container.command), ("args", &container.args)] {
        for (i, entry) in entries.iter().enumerate() {
            let location = format!("{section}[{i}]");
            let arg = CommandLineArgument::from_value(entry, &location)?;
            command.push(arg.into_command_arg()?);
        }
    }

    let inputs = slot_type_map(&doc.inputs, "inputs")?;
    let outputs = slot_type_map(&doc.outputs, "outputs")?;

    create_container_component(
        doc.name,
        image,
        command,
        inputs,
        outputs,
        PropertyTypeMap::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_component::Placeholder;
    use cf_core::{ArtifactType, ArtifactTypeMap};

    const DOC: &str = r#"
name: Test_Kfp_Container_Component
description: Exercises every placeholder kind.
inputs:
  - {name: input1, type: File}
  - {name: input2, type: File}
outputs:
  - {name: output1, type: File}
implementation:
  container:
    image: image1
    command:
      - command1
      - command2
      - {inputPath: input1}
    args:
      - --arg1
      - {inputValue: input2}
      - --arg2
      - {outputPath: output1}
"#;

    fn files(names: &[&str]) -> ArtifactTypeMap {
        names
            .iter()
            .map(|n| (n.to_string(), ArtifactType::FILE))
            .collect()
    }

    #[test]
    fn loads_and_matches_manual_construction() {
        let loaded = load_component_str(DOC).unwrap();
        let manual = create_container_component(
            "Test_Kfp_Container_Component",
            "image1",
            vec![
                "command1".into(),
                "command2".into(),
                Placeholder::input_uri("input1").unwrap().into(),
                "--arg1".into(),
                Placeholder::input_value("input2").unwrap().into(),
                "--arg2".into(),
                Placeholder::output_uri("output1").unwrap().into(),
            ],
            files(&["input1", "input2"]),
            files(&["output1"]),
            PropertyTypeMap::new(),
        )
        .unwrap();

        assert_eq!(loaded.executor_spec().image, manual.executor_spec().image);
        assert_eq!(loaded.executor_spec().command, manual.executor_spec().command);
        assert_eq!(loaded, manual);
    }

    #[test]
    fn already_normalized_document_loads_identically() {
        let normalized = normalized_document(DOC).unwrap();
        let from_normalized = component_from_value(normalized).unwrap();
        assert_eq!(from_normalized, load_component_str(DOC).unwrap());
    }

    #[test]
    fn undeclared_reference_fails() {
        let doc = DOC.replace("{inputValue: input2}", "{inputValue: input9}");
        let err = load_component_str(&doc).unwrap_err();
        assert!(matches!(err, Error::UnresolvedPlaceholder { .. }), "got: {err}");
    }

    #[test]
    fn missing_container_fails() {
        let err = load_component_str("name: c\nimplementation:\n  graph: {}\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed component document: missing implementation.container"
        );
    }

    #[test]
    fn missing_implementation_fails() {
        let err = load_component_str("name: c\n").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn missing_image_fails() {
        let err = load_component_str(
            "name: c\nimplementation:\n  container:\n    command: [echo]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("image"), "got: {err}");
    }

    #[test]
    fn unknown_wrapper_field_fails_with_location() {
        let doc = DOC.replace("{inputValue: input2}", "{concat: [a, b]}");
        let err = load_component_str(&doc).unwrap_err();
        assert!(err.to_string().contains("args[1]"), "got: {err}");
    }

    #[test]
    fn invalid_yaml_is_malformed() {
        let err = load_component_str("name: [unterminated").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn scalar_root_is_malformed() {
        let err = parse_document("just a string").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("component.yaml");
        std::fs::write(&path, DOC).unwrap();
        let component = load_component_yaml(&path).unwrap();
        assert_eq!(component.name(), "Test_Kfp_Container_Component");

        let missing = load_component_yaml(&dir.path().join("absent.yaml"));
        assert!(matches!(missing.unwrap_err(), Error::Io { .. }));
    }
}

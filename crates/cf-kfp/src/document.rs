//! Typed view of an external component document.
//!
//! Only the parts the adapter consumes are modelled. Other keys
//! (`metadata`, `description`, a slot's `default`, ...) are accepted and
//! ignored.

use cf_core::{ArtifactType, ArtifactTypeMap, Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Top-level component document.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDocument {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<SlotDecl>,
    #[serde(default)]
    pub outputs: Vec<SlotDecl>,
    pub implementation: Implementation,
}

/// A declared input or output.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotDecl {
    pub name: String,
    /// Either a type name (`File`) or a single-key map (`{GCSPath: {...}}`).
    #[serde(default, rename = "type")]
    pub type_spec: Option<Value>,
}

impl SlotDecl {
    /// The artifact type this slot declares. Untyped slots are `File`.
    pub fn artifact_type(&self) -> Result<ArtifactType> {
        match &self.type_spec {
            None | Some(Value::Null) => Ok(ArtifactType::FILE),
            Some(Value::String(name)) if !name.trim().is_empty() => {
                Ok(ArtifactType::new(name.as_str()))
            }
            Some(Value::Object(map)) if map.len() == 1 => {
                let (name, _) = map.iter().next().ok_or_else(|| {
                    Error::malformed(format!("slot '{}' has an empty type map", self.name))
                })?;
                Ok(ArtifactType::new(name.as_str()))
            }
            Some(other) => Err(Error::malformed(format!(
                "slot '{}' has an unsupported type specification: {other}",
                self.name
            ))),
        }
    }
}

/// `implementation` section. Only container implementations are supported.
#[derive(Debug, Clone, Deserialize)]
pub struct Implementation {
    #[serde(default)]
    pub container: Option<ContainerImplementation>,
}

/// `implementation.container` section after normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerImplementation {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub command: Vec<Value>,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Build a name-to-type map from slot declarations.
///
/// A name declared twice within one list is rejected here, since the map
/// would otherwise silently keep only one of them.
pub fn slot_type_map(slots: &[SlotDecl], section: &'static str) -> Result<ArtifactTypeMap> {
    let mut map = ArtifactTypeMap::new();
    for slot in slots {
        if map.insert(slot.name.clone(), slot.artifact_type()?).is_some() {
            return Err(Error::DuplicateName {
                name: slot.name.clone(),
                first: section,
                second: section,
            });
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slot(value: Value) -> SlotDecl {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn untyped_slot_is_file() {
        let s = slot(json!({"name": "data"}));
        assert_eq!(s.artifact_type().unwrap(), ArtifactType::FILE);
    }

    #[test]
    fn slot_metadata_keys_are_ignored() {
        let s = slot(json!({
            "name": "epochs",
            "type": "Integer",
            "description": "Training epochs.",
            "optional": true,
            "default": 10,
        }));
        assert_eq!(s.name, "epochs");
        assert_eq!(s.artifact_type().unwrap().name(), "Integer");
    }

    #[test]
    fn named_and_mapped_types() {
        assert_eq!(
            slot(json!({"name": "m", "type": "Model"})).artifact_type().unwrap(),
            ArtifactType::MODEL
        );
        assert_eq!(
            slot(json!({"name": "g", "type": {"GCSPath": {"data_type": "CSV"}}}))
                .artifact_type()
                .unwrap()
                .name(),
            "GCSPath"
        );
    }

    #[test]
    fn unsupported_type_is_malformed() {
        let err = slot(json!({"name": "x", "type": ["a", "b"]}))
            .artifact_type()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn duplicate_slot_rejected() {
        let slots = vec![slot(json!({"name": "a"})), slot(json!({"name": "a"}))];
        let err = slot_type_map(&slots, "inputs").unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn document_ignores_unknown_keys() {
        let doc: ComponentDocument = serde_json::from_value(json!({
            "name": "c",
            "description": "ignored",
            "metadata": {"annotations": {}},
            "implementation": {"container": {"image": "i"}},
        }))
        .unwrap();
        assert_eq!(doc.name, "c");
        let container = doc.implementation.container.unwrap();
        assert_eq!(container.image.as_deref(), Some("i"));
        assert!(container.command.is_empty());
    }
}

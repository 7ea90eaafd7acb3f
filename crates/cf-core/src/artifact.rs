//! Artifact types and run-time artifact handles.
//!
//! An [`ArtifactType`] is the declared type tag of an input or output slot.
//! An [`Artifact`] is the handle an orchestrator binds to that slot when a
//! component actually runs.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ArtifactType
// ---------------------------------------------------------------------------

/// Type tag identifying the kind of artifact bound to an input/output name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactType(Cow<'static, str>);

impl ArtifactType {
    /// Generic file artifact. Used when a document does not declare a type.
    pub const FILE: ArtifactType = ArtifactType(Cow::Borrowed("File"));
    /// A dataset (directory of records).
    pub const DATASET: ArtifactType = ArtifactType(Cow::Borrowed("Dataset"));
    /// A trained model.
    pub const MODEL: ArtifactType = ArtifactType(Cow::Borrowed("Model"));
    /// Evaluation metrics.
    pub const METRICS: ArtifactType = ArtifactType(Cow::Borrowed("Metrics"));

    /// Create a type tag from an arbitrary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for ArtifactType {
    fn default() -> Self {
        Self::FILE
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Declared input or output slots: name to artifact type.
pub type ArtifactTypeMap = BTreeMap<String, ArtifactType>;

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// A typed handle to pipeline-managed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Name of the artifact's type, e.g. "File".
    #[serde(rename = "type")]
    pub type_name: String,
    /// Location of the artifact payload.
    pub uri: String,
    /// Inline value for small value artifacts (strings, numbers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Free-form string properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Artifact {
    /// Create an artifact of the given type located at `uri`.
    pub fn new(artifact_type: &ArtifactType, uri: impl Into<String>) -> Self {
        Self {
            type_name: artifact_type.name().to_string(),
            uri: uri.into(),
            value: None,
            properties: BTreeMap::new(),
        }
    }

    /// Builder: attach an inline value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: set a string property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Run-time bindings: name to the list of artifacts bound to it.
pub type ArtifactMap = BTreeMap<String, Vec<Artifact>>;

//! The [`Executor`] trait: the run-time half of a pipeline component.

use async_trait::async_trait;
use cf_core::{ArtifactMap, ExecProperties, Result};
use serde::{Deserialize, Serialize};

/// Outcome code and message reported by an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Structured result of a successful execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutorOutput {
    /// Output artifacts as updated by the executor.
    #[serde(default)]
    pub output_artifacts: ArtifactMap,
    /// Properties to record on the execution.
    #[serde(default)]
    pub execution_properties: ExecProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExecutionResult>,
}

/// Performs the actual work of one pipeline step.
///
/// The orchestration layer calls [`execute`](Executor::execute) once per
/// attempt and never overlaps two calls on the same instance. Retries are the
/// caller's business.
#[async_trait]
pub trait Executor: Send + Sync {
    /// A short, human-readable name for this executor.
    fn name(&self) -> &str;

    /// Run the step.
    ///
    /// `inputs` and `outputs` map each declared name to the artifacts bound
    /// to it. `exec_properties` are primitive values fixed when the pipeline
    /// was constructed.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the current attempt and is propagated as is.
    async fn execute(
        &self,
        inputs: &ArtifactMap,
        outputs: &ArtifactMap,
        exec_properties: &ExecProperties,
    ) -> Result<Option<ExecutorOutput>>;
}

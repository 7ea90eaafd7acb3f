//! Executor that does nothing.

use async_trait::async_trait;
use cf_core::{ArtifactMap, ExecProperties, Result};

use crate::executor::{Executor, ExecutorOutput};

/// Placeholder executor for steps with no run-time work.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyExecutor;

#[async_trait]
impl Executor for EmptyExecutor {
    fn name(&self) -> &str {
        "empty"
    }

    async fn execute(
        &self,
        _inputs: &ArtifactMap,
        _outputs: &ArtifactMap,
        _exec_properties: &ExecProperties,
    ) -> Result<Option<ExecutorOutput>> {
        Ok(None)
    }
}

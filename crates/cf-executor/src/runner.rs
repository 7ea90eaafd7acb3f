//! Drives a single execution attempt of an [`Executor`].

use cf_core::{ArtifactMap, Error, ExecProperties, Result};

use crate::base::ExecutorBase;
use crate::executor::{Executor, ExecutorOutput};

/// Run `executor` once with the given bindings.
///
/// Logs the bindings, prepares the temp directory when the context has a
/// temp root, executes, and writes the returned output as JSON to the
/// context's executor-output path when one is set.
///
/// # Errors
///
/// Propagates any executor error unchanged; output serialization failures
/// are [`Error::Internal`].
pub async fn run_executor(
    executor: &dyn Executor,
    base: &ExecutorBase,
    inputs: &ArtifactMap,
    outputs: &ArtifactMap,
    exec_properties: &ExecProperties,
) -> Result<Option<ExecutorOutput>> {
    base.log_startup(inputs, outputs, exec_properties);

    if base.context().is_some_and(|ctx| ctx.has_tmp_path()) {
        base.tmp_dir()?;
    }

    let output = executor.execute(inputs, outputs, exec_properties).await?;
    tracing::info!(executor = %executor.name(), "Executor finished");

    if let (Some(out), Some(path)) = (
        output.as_ref(),
        base.context().and_then(|ctx| ctx.executor_output_uri()),
    ) {
        let json = serde_json::to_string_pretty(out)
            .map_err(|e| Error::Internal(format!("failed to serialize executor output: {e}")))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        tracing::info!("Wrote executor output to {}", path.display());
    }

    Ok(output)
}

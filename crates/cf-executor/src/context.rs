//! Per-attempt execution context handed to executors.

use std::path::{Path, PathBuf};

use cf_core::config::Config;
use cf_core::{Error, Result, RunId};

/// Run metadata for one execution attempt.
///
/// Built once by the orchestration layer and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExecutorContext {
    /// Arguments for the distributed engine, if the step uses one.
    engine_args: Option<Vec<String>>,
    /// Base temp directory for the pipeline.
    tmp_dir: Option<PathBuf>,
    /// Distinguishes every execution run.
    unique_id: Option<String>,
    /// Where the executor writes its [`ExecutorOutput`](crate::ExecutorOutput).
    executor_output_uri: Option<PathBuf>,
    /// Storage for stateful runs, e.g. trainer checkpoints.
    stateful_working_dir: Option<PathBuf>,
}

impl ExecutorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from application config with a fresh run id.
    pub fn from_config(config: &Config) -> Self {
        let mut ctx = Self::new().with_run_id(RunId::new());
        ctx.tmp_dir = config.executor.tmp_dir.clone();
        ctx.stateful_working_dir = config.executor.stateful_working_dir.clone();
        if !config.engine.args.is_empty() {
            ctx.engine_args = Some(config.engine.args.clone());
        }
        ctx
    }

    pub fn with_engine_args(mut self, args: Vec<String>) -> Self {
        self.engine_args = Some(args);
        self
    }

    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = Some(dir.into());
        self
    }

    pub fn with_unique_id(mut self, id: impl Into<String>) -> Self {
        self.unique_id = Some(id.into());
        self
    }

    pub fn with_run_id(self, id: RunId) -> Self {
        self.with_unique_id(id.to_string())
    }

    pub fn with_executor_output_uri(mut self, path: impl Into<PathBuf>) -> Self {
        self.executor_output_uri = Some(path.into());
        self
    }

    pub fn with_stateful_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stateful_working_dir = Some(dir.into());
        self
    }

    pub fn engine_args(&self) -> Option<&[String]> {
        self.engine_args.as_deref()
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    pub fn executor_output_uri(&self) -> Option<&Path> {
        self.executor_output_uri.as_deref()
    }

    pub fn stateful_working_dir(&self) -> Option<&Path> {
        self.stateful_working_dir.as_deref()
    }

    /// Whether both a temp root and a non-empty unique id are set.
    pub fn has_tmp_path(&self) -> bool {
        self.tmp_dir.is_some() && self.unique_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// `<tmp_dir>/<unique_id>/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the temp root or the unique id is unset.
    pub fn tmp_path(&self) -> Result<PathBuf> {
        match (&self.tmp_dir, &self.unique_id) {
            (Some(dir), Some(id)) if !id.is_empty() => Ok(dir.join(id).join("")),
            _ => Err(Error::Internal("temp path not available".into())),
        }
    }

    /// Create the temp path if it does not exist yet and return it.
    ///
    /// Safe to call repeatedly.
    pub fn ensure_tmp_dir(&self) -> Result<PathBuf> {
        let path = self.tmp_path()?;
        if !path.exists() {
            tracing::info!("Creating temp directory at {}", path.display());
            std::fs::create_dir_all(&path)?;
        }
        Ok(path)
    }
}

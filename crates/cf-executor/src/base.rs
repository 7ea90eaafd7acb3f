//! State shared by every executor: the context, the optional engine and the
//! normalized engine arguments.

use std::path::PathBuf;
use std::sync::Arc;

use cf_core::{ArtifactMap, Error, ExecProperties, Result};

use crate::context::ExecutorContext;
use crate::engine::{DistributedEngine, EnginePipeline};

/// Common executor plumbing.
///
/// Concrete executors embed one and delegate temp-dir handling, startup
/// logging and engine pipeline creation to it.
#[derive(Debug, Clone)]
pub struct ExecutorBase {
    name: String,
    context: Option<Arc<ExecutorContext>>,
    engine: Option<Arc<dyn DistributedEngine>>,
    engine_args: Vec<String>,
}

impl ExecutorBase {
    /// Create the base for the executor `name`, without an engine.
    ///
    /// Engine arguments present in the context are kept but unused; a
    /// warning is logged.
    pub fn new(name: impl Into<String>, context: Option<Arc<ExecutorContext>>) -> Self {
        let mut base = Self {
            name: name.into(),
            context,
            engine: None,
            engine_args: Vec::new(),
        };
        base.engine_args = base.normalized_engine_args();
        base
    }

    /// Attach a distributed engine and re-normalize the engine arguments.
    pub fn with_engine(mut self, engine: Arc<dyn DistributedEngine>) -> Self {
        self.engine = Some(engine);
        self.engine_args = self.normalized_engine_args();
        self
    }

    fn normalized_engine_args(&self) -> Vec<String> {
        let args = self
            .context
            .as_ref()
            .and_then(|ctx| ctx.engine_args())
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        match self.engine {
            Some(ref engine) => {
                let mut args = engine.prepare_args(args);
                args.push(format!("--labels=executor={}", label_value(&self.name)));
                args
            }
            None => {
                if !args.is_empty() {
                    tracing::warn!(
                        executor = %self.name,
                        "Engine arguments provided but no distributed engine is available; ignoring them"
                    );
                }
                args
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> Option<&ExecutorContext> {
        self.context.as_deref()
    }

    pub fn engine(&self) -> Option<&dyn DistributedEngine> {
        self.engine.as_deref()
    }

    pub fn engine_args(&self) -> &[String] {
        &self.engine_args
    }

    /// Create an engine pipeline from the normalized arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if no engine was injected, and
    /// whatever the engine reports for arguments it rejects.
    pub fn make_pipeline(&self) -> Result<EnginePipeline> {
        let engine = self.engine.as_ref().ok_or_else(|| {
            Error::EngineUnavailable(format!(
                "no distributed engine configured for executor '{}'",
                self.name
            ))
        })?;

        let pipeline = engine.create_pipeline(&self.engine_args)?;
        if let Some(warning) = pipeline.options.parallelism_warning() {
            tracing::warn!(executor = %self.name, "{warning}");
        }
        Ok(pipeline)
    }

    /// The per-run temp directory, created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] without a context or when the context has
    /// no temp root or unique id.
    pub fn tmp_dir(&self) -> Result<PathBuf> {
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| Error::Internal("No context for the executor".into()))?;
        ctx.ensure_tmp_dir()
    }

    /// Dump the step's bindings at debug level.
    pub fn log_startup(
        &self,
        inputs: &ArtifactMap,
        outputs: &ArtifactMap,
        exec_properties: &ExecProperties,
    ) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        tracing::debug!(
            executor = %self.name,
            inputs = %serde_json::to_string(inputs).unwrap_or_default(),
            outputs = %serde_json::to_string(outputs).unwrap_or_default(),
            exec_properties = %serde_json::to_string(exec_properties).unwrap_or_default(),
            "Starting executor"
        );
    }
}

/// Lowercase the name and replace anything outside `[a-z0-9_-]`, capped at
/// 63 characters.
fn label_value(name: &str) -> String {
    name.chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .take(63)
        .collect()
}

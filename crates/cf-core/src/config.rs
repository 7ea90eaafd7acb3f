//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML (or JSON) and
//! carries the sub-configs for logging, the container runtime, the
//! distributed engine and executor directories. Every section defaults
//! sensibly so a completely empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
    pub engine: EngineConfig,
    pub executor: ExecutorConfig,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::validation(format!("config parse error: {e}")))
    }

    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::validation(format!("config parse error: {e}")))
    }

    /// Parse `contents` using the format implied by the extension of `path`.
    pub fn parse_for_path(path: &Path, contents: &str) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(contents),
            _ => Self::from_toml(contents),
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.logging.is_recognized_level() {
            warnings.push(format!(
                "logging.level '{}' is not a recognized level (valid: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if self.runtime.program.as_os_str().is_empty() {
            warnings.push("runtime.program is empty; containers cannot be launched".into());
        }

        if self.runtime.timeout_secs == 0 {
            warnings.push("runtime.timeout_secs is 0; every launch will time out".into());
        }

        if !self.engine.direct_engine && !self.engine.args.is_empty() {
            warnings.push(
                "engine.args are set but no engine is enabled; they will be ignored".into(),
            );
        }

        if let Some(ref dir) = self.executor.tmp_dir {
            if dir.is_relative() {
                warnings.push(format!(
                    "executor.tmp_dir '{}' is relative; it will be resolved against the working directory",
                    dir.display()
                ));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn is_recognized_level(&self) -> bool {
        LOG_LEVELS.contains(&self.level.as_str())
    }

    /// The level to filter on; unrecognized levels fall back to `info`.
    pub fn effective_level(&self) -> &str {
        if self.is_recognized_level() {
            &self.level
        } else {
            "info"
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Container runtime used to launch component images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Runtime CLI, e.g. `docker` or `podman`.
    pub program: PathBuf,
    /// Arguments placed between the program and the image.
    pub run_args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("docker"),
            run_args: vec!["run".into(), "--rm".into()],
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    3600
}

/// Distributed engine bootstrap settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable the built-in in-process direct engine.
    pub direct_engine: bool,
    /// Default arguments handed to the engine for every execution.
    pub args: Vec<String>,
}

/// Executor directory settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Root under which per-run temp directories are created.
    pub tmp_dir: Option<PathBuf>,
    /// Directory for state that survives across attempts (checkpoints).
    pub stateful_working_dir: Option<PathBuf>,
}

//! Distributed data-processing engine strategy.
//!
//! The engine is an injected capability: executors never assume one exists.
//! Without an engine, engine arguments are ignored with a warning and only an
//! explicit [`ExecutorBase::make_pipeline`](crate::ExecutorBase::make_pipeline)
//! call fails.

use std::fmt;

use cf_core::{Error, Result};

/// Default running mode of the direct runner.
pub const DEFAULT_DIRECT_RUNNING_MODE: &str = "in_memory";

/// Engine options understood by the executor layer.
///
/// Flags may be written `--flag=value` or `--flag value`; anything else is
/// kept verbatim in `passthrough`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub runner: Option<String>,
    pub direct_running_mode: Option<String>,
    pub direct_num_workers: Option<u32>,
    pub passthrough: Vec<String>,
}

impl EngineOptions {
    /// Parse engine arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a known flag is missing its value or
    /// `--direct_num_workers` is not a number.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };

            let slot = match flag {
                "--runner" => &mut options.runner,
                "--direct_running_mode" => &mut options.direct_running_mode,
                "--direct_num_workers" => {
                    let raw = take_value(flag, inline, &mut iter)?;
                    let workers = raw.parse::<u32>().map_err(|e| {
                        Error::validation(format!("invalid --direct_num_workers '{raw}': {e}"))
                    })?;
                    options.direct_num_workers = Some(workers);
                    continue;
                }
                _ => {
                    options.passthrough.push(arg.clone());
                    continue;
                }
            };
            *slot = Some(take_value(flag, inline, &mut iter)?);
        }

        Ok(options)
    }

    /// Effective running mode (`in_memory` unless overridden).
    pub fn running_mode(&self) -> &str {
        self.direct_running_mode
            .as_deref()
            .unwrap_or(DEFAULT_DIRECT_RUNNING_MODE)
    }

    /// Effective worker count (1 unless overridden).
    pub fn num_workers(&self) -> u32 {
        self.direct_num_workers.unwrap_or(1)
    }

    /// The warning to emit when the worker count cannot take effect.
    pub fn parallelism_warning(&self) -> Option<String> {
        if self.running_mode() == DEFAULT_DIRECT_RUNNING_MODE && self.num_workers() != 1 {
            Some(format!(
                "direct_num_workers is {} but direct_running_mode is `in_memory`; use \
                 `multi_processing` or `multi_threading` for the worker parallelism to take effect",
                self.num_workers()
            ))
        } else {
            None
        }
    }
}

fn take_value<'a>(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<String> {
    match inline {
        Some(value) => Ok(value),
        None => rest
            .next()
            .cloned()
            .ok_or_else(|| Error::validation(format!("engine flag {flag} is missing a value"))),
    }
}

/// A pipeline handle created by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePipeline {
    pub engine: String,
    pub args: Vec<String>,
    pub options: EngineOptions,
}

/// A distributed data-processing engine that executors can run on.
pub trait DistributedEngine: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Normalize user-provided arguments, e.g. add dependency flags.
    fn prepare_args(&self, args: Vec<String>) -> Vec<String> {
        args
    }

    /// Create a pipeline configured by `args`.
    fn create_pipeline(&self, args: &[String]) -> Result<EnginePipeline>;
}

/// In-process engine backed by the direct runner.
#[derive(Debug, Clone, Default)]
pub struct DirectEngine {
    /// Packages shipped to workers unless the caller supplies its own
    /// `--setup_file` or `--extra_package`.
    pub extra_packages: Vec<String>,
}

impl DirectEngine {
    pub const RUNNER: &'static str = "DirectRunner";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_package(mut self, package: impl Into<String>) -> Self {
        self.extra_packages.push(package.into());
        self
    }
}

impl DistributedEngine for DirectEngine {
    fn name(&self) -> &str {
        "direct"
    }

    fn prepare_args(&self, mut args: Vec<String>) -> Vec<String> {
        let has_dependency_flag = args.iter().any(|a| {
            a.starts_with("--setup_file") || a.starts_with("--extra_package")
        });
        if !has_dependency_flag {
            args.extend(
                self.extra_packages
                    .iter()
                    .map(|p| format!("--extra_package={p}")),
            );
        }
        args
    }

    fn create_pipeline(&self, args: &[String]) -> Result<EnginePipeline> {
        let options = EngineOptions::parse(args)?;
        if let Some(ref runner) = options.runner {
            if runner != Self::RUNNER {
                return Err(Error::EngineUnavailable(format!(
                    "runner '{runner}' is not supported by the direct engine"
                )));
            }
        }
        Ok(EnginePipeline {
            engine: self.name().to_string(),
            args: args.to_vec(),
            options,
        })
    }
}

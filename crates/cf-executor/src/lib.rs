//! # cf-executor
//!
//! Run-time side of components: the [`Executor`] trait, its
//! [`ExecutorContext`], shared [`ExecutorBase`] plumbing, the injectable
//! [`DistributedEngine`] strategy and the built-in executors.

pub mod base;
pub mod command;
pub mod context;
pub mod engine;
pub mod executor;
pub mod executors;
pub mod runner;

pub use base::ExecutorBase;
pub use command::{ToolCommand, ToolOutput};
pub use context::ExecutorContext;
pub use engine::{DirectEngine, DistributedEngine, EngineOptions, EnginePipeline};
pub use executor::{ExecutionResult, Executor, ExecutorOutput};
pub use executors::{ContainerExecutor, ContainerRuntime, EmptyExecutor};
pub use runner::run_executor;

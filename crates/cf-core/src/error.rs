//! Unified error type for componentforge.
//!
//! All crates funnel their failures into [`Error`]. Every variant belongs to
//! one [`ErrorCategory`], which lets callers tell construction-time
//! validation failures apart from failures of a running execution attempt.

use std::fmt;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while building a component; no component was produced.
    Validation,
    /// Raised inside an executor; fatal to the current attempt.
    Runtime,
    /// The environment lacks a capability that was explicitly requested.
    Environment,
}

/// Unified error type covering all failure modes in componentforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A name, image or other declared value failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same name was declared more than once across inputs, outputs and
    /// parameters.
    #[error("Duplicate name '{name}' declared in {first} and {second}")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Where the name was first declared (e.g. "inputs").
        first: &'static str,
        /// Where the name was declared again.
        second: &'static str,
    },

    /// A placeholder references a name that is not declared.
    #[error("Unresolved placeholder {kind}('{name}'): no such {expected}")]
    UnresolvedPlaceholder {
        /// Placeholder kind, e.g. "InputUri".
        kind: String,
        /// The referenced name.
        name: String,
        /// What the name should have matched ("input" or "output").
        expected: &'static str,
    },

    /// The external component document is structurally invalid.
    #[error("Malformed component document: {0}")]
    MalformedDocument(String),

    /// A command-line argument wrapper does not have exactly one field set.
    #[error("Malformed command-line argument at {location}: {message}")]
    MalformedArgument {
        /// Position of the wrapper, e.g. "command[3]".
        location: String,
        /// Human-readable error description.
        message: String,
    },

    /// A placeholder could not be substituted at run time.
    #[error("Resolution error for '{name}': {message}")]
    Resolution {
        /// The referenced input/output/parameter name.
        name: String,
        /// Human-readable error description.
        message: String,
    },

    /// An executor failed while running.
    #[error("Execution error [{executor}]: {message}")]
    Execution {
        /// Name of the executor that failed.
        executor: String,
        /// Human-readable error description.
        message: String,
    },

    /// An external program (container runtime, etc.) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the program that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// A distributed engine was required but none is available.
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Validation(_)
            | Error::DuplicateName { .. }
            | Error::UnresolvedPlaceholder { .. }
            | Error::MalformedDocument(_)
            | Error::MalformedArgument { .. } => ErrorCategory::Validation,
            Error::EngineUnavailable(_) => ErrorCategory::Environment,
            Error::Resolution { .. }
            | Error::Execution { .. }
            | Error::Tool { .. }
            | Error::Io { .. }
            | Error::Internal(_) => ErrorCategory::Runtime,
        }
    }

    /// Whether this error was raised during component construction.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Convenience constructor for [`Error::MalformedDocument`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }

    /// Convenience constructor for [`Error::MalformedArgument`].
    pub fn malformed_argument(location: impl fmt::Display, message: impl Into<String>) -> Self {
        Error::MalformedArgument {
            location: location.to_string(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Resolution`].
    pub fn resolution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Resolution {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Execution`].
    pub fn execution(executor: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Execution {
            executor: executor.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//! Error handling for vsgraph
//!
//! This module defines the crate-level error type and a Result alias for use
//! outside the pure compiler core (project loading, configuration, CLI).

use crate::compiler::CompileError;
use crate::graph::GraphError;
use thiserror::Error;

/// Main error type for vsgraph operations
#[derive(Error, Debug)]
pub enum Error {
    /// The graph violates a structural invariant
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The graph could not be compiled
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The compile error underneath any context layers, if there is one.
    pub fn as_compile_error(&self) -> Option<&CompileError> {
        match self {
            Error::Compile(e) => Some(e),
            Error::WithContext { source, .. } => source.as_compile_error(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Result type alias for vsgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

// src/core/error.rs

use thiserror::Error;

/// Error taxonomy for the toolkit.
///
/// Configuration problems are detected at construction and are fatal;
/// validation, lookup and execution failures are surfaced to the calling
/// framework with their original messages intact.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Missing or invalid wiring, caught before any tool runs.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input failed parameter schema parsing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Requested tool name does not exist in the resolved registry.
    #[error("tool '{0}' not found")]
    ToolNotFound(String),

    /// Two tools with the same name were contributed to one registry snapshot.
    #[error("duplicate tool name '{0}' in registry")]
    DuplicateTool(String),

    /// A tool body failed while running.
    #[error("tool execution failed: {0}")]
    Execution(String),

    /// A sequential batch aborted part-way through.
    #[error("batch transaction failed at index {index}: {message}")]
    Batch {
        /// Zero-based position of the transaction that failed.
        index: usize,
        message: String,
        /// Hashes of transactions confirmed before the failure.
        completed: Vec<String>,
    },
}

impl From<anyhow::Error> for ToolkitError {
    fn from(err: anyhow::Error) -> Self {
        ToolkitError::Execution(format!("{err:#}"))
    }
}

/// Validation failure listing every violated constraint, each prefixed with
/// the field path it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter validation failed: {}", .violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

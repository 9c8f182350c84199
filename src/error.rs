//! Error types for Vectorscope.

use thiserror::Error;

/// Vectorscope error types.
#[derive(Error, Debug)]
pub enum VectorscopeError {
    /// Two vectors of unequal length met in an algebra or distance call
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A word that is not in the embedding store
    #[error("Unknown word: {0}")]
    UnknownWord(String),

    /// Wrong token count or token shape
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Non-positive neighbor count
    #[error("Invalid neighbor count k = {0}, must be at least 1")]
    InvalidK(usize),

    /// A stored vector with an infinite or NaN component
    #[error("Invalid vector for '{0}': components must be finite")]
    InvalidVector(String),

    /// The same word inserted twice into a store
    #[error("Duplicate word: {0}")]
    DuplicateWord(String),

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Filesystem error while loading a store or config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Vectorscope operations.
pub type Result<T> = std::result::Result<T, VectorscopeError>;

//! Core error types (deterministic only)

use thiserror::Error;

/// Domain errors raised by the segmentation core
#[derive(Debug, Error)]
pub enum CoreError {
    /// A timed span violates the caller precondition
    #[error("invalid span at index {index}: {reason}")]
    InvalidSpan {
        /// Position of the span in the input sequence
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Rule table configuration error
    #[error("rule configuration error: {0}")]
    RuleConfig(String),

    /// A matcher pattern failed to compile
    #[error("invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        /// Rule (or named pattern) the regex belongs to
        rule: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A matcher refers to a named pattern that is not defined
    #[error("rule '{rule}' refers to unknown pattern '{pattern}'")]
    UnknownPattern {
        /// Rule holding the reference
        rule: String,
        /// Missing pattern name
        pattern: String,
    },

    /// Reading a rule table from disk failed
    #[error("failed to read rule table {path}: {message}")]
    Io {
        /// File that could not be read
        path: String,
        /// I/O error message
        message: String,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

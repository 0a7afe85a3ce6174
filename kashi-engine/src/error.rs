//! Layered error types
//!
//! Domain failures come from `kashi-core` as [`CoreError`] and are wrapped;
//! everything the engine adds on top is listed here.

use crate::tokenizer::TokenizerError;
use kashi_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Domain error (invalid span, bad rule table, ...)
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The tokenizer failed on a span
    #[error("tokenizer failed on span {index}: {source}")]
    Tokenizer {
        /// Position of the span in the input sequence
        index: usize,
        /// Error reported by the tokenizer
        #[source]
        source: TokenizerError,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Building the worker pool failed
    #[cfg(feature = "parallel")]
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

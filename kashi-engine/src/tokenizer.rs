//! Morphological analyzer contract
//!
//! The engine never analyses text itself. Hosts plug in their analyzer
//! (MeCab, kuromoji, lindera, a lookup table in tests) through [`Tokenizer`].

use kashi_core::FeatureToken;
use std::error::Error as StdError;
use thiserror::Error;

/// Failure reported by a [`Tokenizer`]
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TokenizerError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TokenizerError {
    /// Create an error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error that wraps an underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Splits text into ordered [`FeatureToken`]s
///
/// `word_position` of every returned token must be the 0-based character
/// offset of its surface form in `text`.
pub trait Tokenizer: Send + Sync {
    /// Analyse `text`
    fn tokenize(&self, text: &str) -> Result<Vec<FeatureToken>, TokenizerError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<FeatureToken> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Result<Vec<FeatureToken>, TokenizerError> {
        Ok(self(text))
    }
}

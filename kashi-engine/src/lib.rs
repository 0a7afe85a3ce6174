//! Segmentation of timed lyric spans into display units
//!
//! This crate ties the rule tables of `kashi-core` to a host tokenizer: it
//! prepares each span's text, calls the tokenizer, re-aligns the tokens with
//! their spans, and assembles timed [`Line`]s span by span, optionally in
//! parallel.
//!
//! # Example
//!
//! ```rust
//! use kashi_engine::{FeatureToken, Segmenter, TimedSpan};
//!
//! // Any `Fn(&str) -> Vec<FeatureToken>` works as a tokenizer
//! let tokenizer = |text: &str| {
//!     text.split_inclusive(' ')
//!         .scan(0, |pos, word| {
//!             let token = FeatureToken::new(word.trim_end(), *pos);
//!             *pos += word.chars().count();
//!             Some(token)
//!         })
//!         .collect::<Vec<_>>()
//! };
//!
//! let segmenter = Segmenter::new()?;
//! let lines = segmenter.segment(&tokenizer, &[TimedSpan::new("hello", 0.0, 1.0)])?;
//! assert_eq!(lines[0].text(), "hello");
//! assert_eq!(lines[0].end(), Some(1.0));
//! # Ok::<(), kashi_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod aligner;
pub mod assembler;
pub mod config;
pub mod error;
pub mod executor;
pub mod processor;
pub mod tokenizer;

// Re-export key types
pub use aligner::{align, AlignedSpan};
pub use assembler::SpanAssembler;
pub use config::{default_substitutions, EngineConfig, EngineConfigBuilder, Substitution};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use processor::{Segmenter, SegmenterBuilder};
pub use tokenizer::{Tokenizer, TokenizerError};

// Re-export from core for convenience
pub use kashi_core::{
    default_rules, EnclosureConfig, FeatureToken, FieldName, InsertPolicy, Line, RuleSet,
    RuleTable, SegmentationUnit, TimedSpan,
};

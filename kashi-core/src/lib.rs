//! Rule-driven segmentation of timed lyric spans
//!
//! This crate holds the pure domain of the segmenter: morphological tokens,
//! timed spans and the units they are cut into, the ordered break and
//! whitespace rule tables with their evaluator, the per-token context window,
//! bracket/quote ranges and proportional timing.
//!
//! Orchestration (tokenizer calls, alignment, per-span assembly and parallel
//! fan-out) lives in `kashi-engine`.
//!
//! # Example
//!
//! ```rust
//! use kashi_core::{ContextBuilder, EnclosureSet, FeatureToken, default_rules};
//!
//! let text = "花が咲いた";
//! let tokens = vec![
//!     FeatureToken::from_ipadic("花", 0, "名詞,一般,*,*,*,*,花,ハナ,ハナ"),
//!     FeatureToken::from_ipadic("が", 1, "助詞,格助詞,一般,*,*,*,が,ガ,ガ"),
//!     FeatureToken::from_ipadic("咲い", 2, "動詞,自立,*,*,五段・カ行イ音便,連用タ接続,咲く,サイ,サイ"),
//!     FeatureToken::from_ipadic("た", 4, "助動詞,*,*,*,特殊・タ,基本形,た,タ,タ"),
//! ];
//!
//! let rules = default_rules().unwrap();
//! let enclosures = EnclosureSet::default();
//! let builder = ContextBuilder::new(&tokens, text, &enclosures);
//!
//! let ctx = builder.context(3, None).unwrap();
//! assert!(ctx.is_last_token);
//! assert!(rules.break_rules.first_match(&ctx).is_none());
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod enclosure;
pub mod error;
pub mod rules;
pub mod span;
pub mod timing;
pub mod token;

pub use context::{ContextBuilder, MatchContext};
pub use enclosure::{EnclosureConfig, EnclosureIndex, EnclosureRange, EnclosureSet};
pub use error::{CoreError, Result};
pub use rules::{
    default_rules, FieldMatcher, InsertPolicy, LengthBound, LengthConstraints, PredicateGroup,
    Rule, RuleSet, RuleTable, SetPolarity,
};
pub use span::{Line, SegmentationUnit, TimedSpan};
pub use timing::{round_ms, TimingInterpolator};
pub use token::{FeatureToken, FieldName};

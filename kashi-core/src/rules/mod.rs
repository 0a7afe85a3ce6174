//! Break and whitespace rules
//!
//! - `matcher`: field-level tests (regex or literal set)
//! - `rule`: predicate groups, length checks, insert policy
//! - `evaluator`: ordered tables with first-match semantics
//! - `config` / `loader`: TOML schema and the embedded default table

mod config;
mod evaluator;
mod loader;
mod matcher;
mod rule;

pub use config::{
    BoundConfig, GroupConfig, LengthConfig, MatcherConfig, Metadata, RuleConfig, RuleSet,
    RuleTableConfig,
};
pub use evaluator::RuleTable;
pub use loader::default_rules;
pub use matcher::{FieldMatcher, SetPolarity};
pub use rule::{InsertPolicy, LengthBound, LengthConstraints, PredicateGroup, Rule};

//! TOML schema for rule tables
//!
//! ```toml
//! [metadata]
//! name = "example"
//!
//! [patterns]
//! mark = '[!?！？]'
//!
//! [[break_rules]]
//! name = "after-mark"
//! current.surface_form = [{ pattern = "mark" }]
//! after.surface_form = [{ not_pattern = "mark" }]
//!
//! [[whitespace_rules]]
//! after.surface_form = [{ regex = '^\s+$' }]
//! ```

use super::evaluator::RuleTable;
use super::matcher::FieldMatcher;
use super::rule::{InsertPolicy, LengthBound, LengthConstraints, PredicateGroup, Rule};
use crate::error::{CoreError, Result};
use crate::token::FieldName;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Root of a rule table document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTableConfig {
    /// Table name and description
    #[serde(default)]
    pub metadata: Metadata,
    /// Named regular expressions referenced by `pattern` matchers
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
    /// Rules deciding line breaks, in evaluation order
    #[serde(default)]
    pub break_rules: Vec<RuleConfig>,
    /// Rules deciding visible whitespace, in evaluation order
    #[serde(default)]
    pub whitespace_rules: Vec<RuleConfig>,
}

/// The `[metadata]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Name carried over to [`RuleSet::name`]
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// One `[[break_rules]]` or `[[whitespace_rules]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Name used in diagnostics; generated from the position when missing
    #[serde(default)]
    pub name: Option<String>,
    /// Tests on the previous token
    #[serde(default)]
    pub before: Option<GroupConfig>,
    /// Tests on the current token
    #[serde(default)]
    pub current: Option<GroupConfig>,
    /// Tests on the next token
    #[serde(default)]
    pub after: Option<GroupConfig>,
    /// Length bounds, checked only alongside the matching group
    #[serde(default)]
    pub length: Option<LengthConfig>,
    /// Where a match puts the break
    #[serde(default)]
    pub insert: InsertPolicy,
}

/// Field name to matcher list
pub type GroupConfig = BTreeMap<String, Vec<MatcherConfig>>;

/// A single matcher, externally tagged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherConfig {
    /// Inline regular expression
    Regex(String),
    /// Inline regular expression that must not match
    NotRegex(String),
    /// Named entry of `[patterns]`
    Pattern(String),
    /// Named entry of `[patterns]` that must not match
    NotPattern(String),
    /// Field equals one of the values
    AnyOf(Vec<String>),
    /// Field is present and equals none of the values
    NoneOf(Vec<String>),
}

/// The `length` table of a rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthConfig {
    /// Surface length of the current token
    #[serde(default)]
    pub current: Option<BoundConfig>,
    /// Surface length of the next token
    #[serde(default)]
    pub after: Option<BoundConfig>,
    /// Distance back to the last break
    #[serde(default)]
    pub past: Option<BoundConfig>,
    /// Distance forward to the next space
    #[serde(default)]
    pub remaining: Option<BoundConfig>,
}

/// One length bound
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundConfig {
    /// Lower bound
    #[serde(default)]
    pub larger_than: Option<usize>,
    /// Upper bound
    #[serde(default)]
    pub shorter_than: Option<usize>,
    /// Bounds compare with `>=` / `<=`; `false` makes them strict
    #[serde(default = "default_true")]
    pub inclusive: bool,
    /// Required value of the "next token is last" flag
    #[serde(default)]
    pub next_is_last: Option<bool>,
    /// Only valid on `past`
    #[serde(default)]
    pub from_line_start: bool,
    /// Only valid on `remaining`
    #[serde(default)]
    pub to_line_end: bool,
}

fn default_true() -> bool {
    true
}

impl BoundConfig {
    fn to_bound(&self) -> LengthBound {
        LengthBound {
            larger_than: self.larger_than,
            shorter_than: self.shorter_than,
            inclusive: self.inclusive,
            next_is_last: self.next_is_last,
        }
    }
}

/// Compiled break and whitespace tables
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Document name from `[metadata]`
    pub name: String,
    /// Rules deciding line breaks
    pub break_rules: RuleTable,
    /// Rules deciding visible whitespace
    pub whitespace_rules: RuleTable,
}

impl RuleTableConfig {
    /// Compile every pattern and rule
    pub fn compile(&self) -> Result<RuleSet> {
        let mut patterns = HashMap::with_capacity(self.patterns.len());
        for (name, source) in &self.patterns {
            let regex = Regex::new(source).map_err(|source| CoreError::InvalidPattern {
                rule: format!("patterns.{name}"),
                source,
            })?;
            patterns.insert(name.as_str(), regex);
        }

        let compiler = Compiler { patterns };
        Ok(RuleSet {
            name: self.metadata.name.clone(),
            break_rules: compiler.table("break_rules", &self.break_rules)?,
            whitespace_rules: compiler.table("whitespace_rules", &self.whitespace_rules)?,
        })
    }
}

struct Compiler<'a> {
    patterns: HashMap<&'a str, Regex>,
}

impl Compiler<'_> {
    fn table(&self, table: &str, rules: &[RuleConfig]) -> Result<RuleTable> {
        let compiled = rules
            .iter()
            .enumerate()
            .map(|(i, config)| {
                let name = config
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{table}[{i}]"));
                self.rule(name, config)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleTable::new(table, compiled))
    }

    fn rule(&self, name: String, config: &RuleConfig) -> Result<Rule> {
        let before = self.group(&name, config.before.as_ref())?;
        let current = self.group(&name, config.current.as_ref())?;
        let after = self.group(&name, config.after.as_ref())?;
        let length = match &config.length {
            Some(length) => self.length(&name, length)?,
            None => LengthConstraints::default(),
        };

        Ok(Rule {
            name,
            before,
            current,
            after,
            length,
            insert: config.insert,
        })
    }

    fn group(&self, rule: &str, config: Option<&GroupConfig>) -> Result<PredicateGroup> {
        let mut group = PredicateGroup::new();
        let Some(config) = config else {
            return Ok(group);
        };

        for (key, matchers) in config {
            let field: FieldName = key
                .parse()
                .map_err(|e| CoreError::RuleConfig(format!("rule '{rule}': {e}")))?;
            if matchers.is_empty() {
                return Err(CoreError::RuleConfig(format!(
                    "rule '{rule}': field '{field}' has no matchers"
                )));
            }
            for matcher in matchers {
                group.push(field, self.matcher(rule, matcher)?);
            }
        }
        Ok(group)
    }

    fn matcher(&self, rule: &str, config: &MatcherConfig) -> Result<FieldMatcher> {
        let compile = |source: &str| {
            Regex::new(source).map_err(|source| CoreError::InvalidPattern {
                rule: rule.to_string(),
                source,
            })
        };
        let named = |name: &str| {
            self.patterns
                .get(name)
                .cloned()
                .ok_or_else(|| CoreError::UnknownPattern {
                    rule: rule.to_string(),
                    pattern: name.to_string(),
                })
        };

        Ok(match config {
            MatcherConfig::Regex(source) => FieldMatcher::Pattern {
                regex: compile(source)?,
                negate: false,
            },
            MatcherConfig::NotRegex(source) => FieldMatcher::Pattern {
                regex: compile(source)?,
                negate: true,
            },
            MatcherConfig::Pattern(name) => FieldMatcher::Pattern {
                regex: named(name)?,
                negate: false,
            },
            MatcherConfig::NotPattern(name) => FieldMatcher::Pattern {
                regex: named(name)?,
                negate: true,
            },
            MatcherConfig::AnyOf(values) => FieldMatcher::any_of(values.iter().cloned()),
            MatcherConfig::NoneOf(values) => FieldMatcher::none_of(values.iter().cloned()),
        })
    }

    fn length(&self, rule: &str, config: &LengthConfig) -> Result<LengthConstraints> {
        let reject = |check: &str, flag: &str| {
            CoreError::RuleConfig(format!(
                "rule '{rule}': '{flag}' is not valid on the '{check}' length check"
            ))
        };

        for (check, bound) in [("current", &config.current), ("after", &config.after)] {
            if let Some(bound) = bound {
                if bound.from_line_start {
                    return Err(reject(check, "from_line_start"));
                }
                if bound.to_line_end {
                    return Err(reject(check, "to_line_end"));
                }
            }
        }
        if config.past.as_ref().is_some_and(|b| b.to_line_end) {
            return Err(reject("past", "to_line_end"));
        }
        if config.remaining.as_ref().is_some_and(|b| b.from_line_start) {
            return Err(reject("remaining", "from_line_start"));
        }

        Ok(LengthConstraints {
            current: config.current.as_ref().map(BoundConfig::to_bound),
            after: config.after.as_ref().map(BoundConfig::to_bound),
            past: config.past.as_ref().map(BoundConfig::to_bound),
            past_from_line_start: config.past.as_ref().is_some_and(|b| b.from_line_start),
            remaining: config.remaining.as_ref().map(BoundConfig::to_bound),
            remaining_to_line_end: config.remaining.as_ref().is_some_and(|b| b.to_line_end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> RuleTableConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_compile_named_patterns() {
        let config = parse(
            r#"
            [metadata]
            name = "marks"

            [patterns]
            mark = '[!?！？]'

            [[break_rules]]
            name = "after-mark"
            current.surface_form = [{ pattern = "mark" }]
            after.surface_form = [{ not_pattern = "mark" }]

            [[whitespace_rules]]
            after.surface_form = [{ regex = '^\s+$' }]
            "#,
        );

        let set = config.compile().unwrap();
        assert_eq!(set.name, "marks");
        assert_eq!(set.break_rules.len(), 1);
        assert_eq!(set.break_rules.rules()[0].name, "after-mark");
        assert_eq!(set.whitespace_rules.rules()[0].name, "whitespace_rules[0]");
    }

    #[test]
    fn test_sets_and_insert_policy() {
        let config = parse(
            r#"
            [[break_rules]]
            insert = "before"
            before.pos = [{ any_of = ["助詞"] }]
            before.pos_detail_1 = [{ none_of = ["格助詞", "係助詞"] }]
            "#,
        );

        let set = config.compile().unwrap();
        let rule = &set.break_rules.rules()[0];
        assert_eq!(rule.insert, InsertPolicy::Before);
        assert_eq!(rule.before.matchers(FieldName::PosDetail1).len(), 1);
        assert!(rule.current.is_empty());
    }

    #[test]
    fn test_length_config() {
        let config = parse(
            r#"
            [[break_rules]]
            current.pos = [{ any_of = ["動詞"] }]
            length.past = { larger_than = 5, from_line_start = true }
            length.remaining = { larger_than = 4, inclusive = false, next_is_last = true }
            "#,
        );

        let set = config.compile().unwrap();
        let length = &set.break_rules.rules()[0].length;
        assert!(length.past_from_line_start);
        assert!(!length.remaining_to_line_end);
        let remaining = length.remaining.unwrap();
        assert_eq!(remaining.larger_than, Some(4));
        assert!(!remaining.inclusive);
        assert_eq!(remaining.next_is_last, Some(true));
        assert!(length.past.unwrap().inclusive);
    }

    #[test]
    fn test_misplaced_selector_is_rejected() {
        let config = parse(
            r#"
            [[break_rules]]
            length.current = { larger_than = 1, to_line_end = true }
            "#,
        );
        assert!(matches!(config.compile(), Err(CoreError::RuleConfig(_))));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let config = parse(
            r#"
            [[break_rules]]
            current.surface = [{ regex = "a" }]
            "#,
        );
        match config.compile() {
            Err(CoreError::RuleConfig(msg)) => assert!(msg.contains("surface")),
            other => panic!("Expected RuleConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_pattern_is_rejected() {
        let config = parse(
            r#"
            [[break_rules]]
            name = "dangling"
            current.surface_form = [{ pattern = "missing" }]
            "#,
        );
        match config.compile() {
            Err(CoreError::UnknownPattern { rule, pattern }) => {
                assert_eq!(rule, "dangling");
                assert_eq!(pattern, "missing");
            }
            other => panic!("Expected UnknownPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_matcher_list_is_rejected() {
        let config = parse(
            r#"
            [[break_rules]]
            current.pos = []
            "#,
        );
        assert!(matches!(config.compile(), Err(CoreError::RuleConfig(_))));
    }

    #[test]
    fn test_invalid_named_pattern() {
        let config = parse(
            r#"
            [patterns]
            broken = '(['
            "#,
        );
        match config.compile() {
            Err(CoreError::InvalidPattern { rule, .. }) => assert_eq!(rule, "patterns.broken"),
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
    }
}

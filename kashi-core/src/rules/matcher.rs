//! Field matchers: the leaves of a rule predicate

use crate::error::{CoreError, Result};
use regex::Regex;

/// Membership polarity of a literal set matcher
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SetPolarity {
    /// Match when the value is one of the literals
    Member,
    /// Match when the value is none of the literals
    NotMember,
}

/// A test against one string field of a token
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    /// Regex search anywhere in the value, optionally negated
    Pattern {
        /// Compiled expression
        regex: Regex,
        /// Match when the expression does *not* find anything
        negate: bool,
    },
    /// Literal set membership
    Set {
        /// Literal values
        values: Vec<String>,
        /// Member or not-member
        polarity: SetPolarity,
    },
}

impl FieldMatcher {
    /// Matcher that succeeds when `pattern` finds a match
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(FieldMatcher::Pattern {
            regex: compile(pattern)?,
            negate: false,
        })
    }

    /// Matcher that succeeds when `pattern` finds nothing
    pub fn not_regex(pattern: &str) -> Result<Self> {
        Ok(FieldMatcher::Pattern {
            regex: compile(pattern)?,
            negate: true,
        })
    }

    /// Matcher that succeeds when the value equals one of `values`
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldMatcher::Set {
            values: values.into_iter().map(Into::into).collect(),
            polarity: SetPolarity::Member,
        }
    }

    /// Matcher that succeeds when the value equals none of `values`
    pub fn none_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldMatcher::Set {
            values: values.into_iter().map(Into::into).collect(),
            polarity: SetPolarity::NotMember,
        }
    }

    /// Test a field value; an absent field never matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            FieldMatcher::Pattern { regex, negate } => regex.is_match(value) != *negate,
            FieldMatcher::Set { values, polarity } => {
                let member = values.iter().any(|v| v == value);
                match polarity {
                    SetPolarity::Member => member,
                    SetPolarity::NotMember => !member,
                }
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
        rule: pattern.to_string(),
        source,
    })
}

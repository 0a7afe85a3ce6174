//! Rule model: predicate groups, length constraints and insert policy

use super::matcher::FieldMatcher;
use crate::context::MatchContext;
use crate::token::{FeatureToken, FieldName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which unit a matched rule attaches its effect to
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPolicy {
    /// The unit of the token being evaluated
    #[default]
    Current,
    /// The previously emitted unit
    Before,
}

type Matchers = SmallVec<[FieldMatcher; 2]>;

/// Field tests against one token of the window
///
/// Every field with matchers must have at least one succeeding matcher. An
/// empty group holds for any token, including a missing one.
#[derive(Debug, Clone, Default)]
pub struct PredicateGroup {
    fields: [Option<Matchers>; FieldName::COUNT],
}

impl PredicateGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matcher to the disjunction of `field`
    pub fn push(&mut self, field: FieldName, matcher: FieldMatcher) {
        self.fields[field.index()]
            .get_or_insert_with(SmallVec::new)
            .push(matcher);
    }

    /// Builder form of [`Self::push`]
    pub fn with(mut self, field: FieldName, matcher: FieldMatcher) -> Self {
        self.push(field, matcher);
        self
    }

    /// True when no field has matchers
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(Option::is_none)
    }

    /// Matchers registered for `field`
    pub fn matchers(&self, field: FieldName) -> &[FieldMatcher] {
        self.fields[field.index()].as_deref().unwrap_or(&[])
    }

    /// Evaluate the group against a token of the window
    pub fn matches(&self, token: Option<&FeatureToken>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(token) = token else {
            return false;
        };
        FieldName::ALL.iter().all(|&field| match &self.fields[field.index()] {
            Some(matchers) => {
                let value = token.field(field);
                matchers.iter().any(|m| m.matches(value))
            }
            None => true,
        })
    }
}

/// Numeric bounds on one length measure
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LengthBound {
    /// Lower bound
    pub larger_than: Option<usize>,
    /// Upper bound
    pub shorter_than: Option<usize>,
    /// Bounds compare with `>=` / `<=` instead of `>` / `<`
    pub inclusive: bool,
    /// Required value of the "next token is last" flag
    pub next_is_last: Option<bool>,
}

impl Default for LengthBound {
    fn default() -> Self {
        Self {
            larger_than: None,
            shorter_than: None,
            inclusive: true,
            next_is_last: None,
        }
    }
}

impl LengthBound {
    /// A bound that admits everything; combine with the builder methods
    pub fn any() -> Self {
        Self::default()
    }

    /// Value must be at least `n`
    pub fn at_least(n: usize) -> Self {
        Self {
            larger_than: Some(n),
            ..Self::default()
        }
    }

    /// Value must be at most `n`
    pub fn at_most(n: usize) -> Self {
        Self {
            shorter_than: Some(n),
            ..Self::default()
        }
    }

    /// Add an upper bound
    pub fn and_at_most(mut self, n: usize) -> Self {
        self.shorter_than = Some(n);
        self
    }

    /// Compare strictly
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }

    /// Require the "next token is last" flag to equal `value`
    pub fn when_next_is_last(mut self, value: bool) -> Self {
        self.next_is_last = Some(value);
        self
    }

    /// Check `value` and the next-is-last gate
    pub fn admits(&self, value: usize, next_is_last: bool) -> bool {
        if self.next_is_last.is_some_and(|required| required != next_is_last) {
            return false;
        }
        let lower = self.larger_than.map_or(true, |n| {
            if self.inclusive {
                value >= n
            } else {
                value > n
            }
        });
        let upper = self.shorter_than.map_or(true, |n| {
            if self.inclusive {
                value <= n
            } else {
                value < n
            }
        });
        lower && upper
    }
}

/// Length checks of a rule
///
/// Current-side checks only run for rules with a current group, the after
/// check only for rules with an after group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthConstraints {
    /// Surface length of the current token
    pub current: Option<LengthBound>,
    /// Surface length of the next token; passes when there is none
    pub after: Option<LengthBound>,
    /// Backward distance
    pub past: Option<LengthBound>,
    /// Measure `past` from the first token of the span
    pub past_from_line_start: bool,
    /// Forward distance
    pub remaining: Option<LengthBound>,
    /// Measure `remaining` to the end of the span
    pub remaining_to_line_end: bool,
}

impl LengthConstraints {
    /// True when no check is configured
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.after.is_none() && self.past.is_none() && self.remaining.is_none()
    }

    /// Checks that gate the current token
    pub fn current_side_holds(&self, ctx: &MatchContext<'_>) -> bool {
        let next_is_last = ctx.next_is_last;
        self.current
            .map_or(true, |b| b.admits(ctx.current.char_len(), next_is_last))
            && self
                .past
                .map_or(true, |b| b.admits(ctx.past(self.past_from_line_start), next_is_last))
            && self
                .remaining
                .map_or(true, |b| b.admits(ctx.remaining(self.remaining_to_line_end), next_is_last))
    }

    /// Checks that gate the next token
    pub fn after_side_holds(&self, ctx: &MatchContext<'_>) -> bool {
        match (self.after, ctx.after) {
            (Some(bound), Some(after)) => bound.admits(after.char_len(), ctx.next_is_last),
            _ => true,
        }
    }
}

/// A named predicate bundle
#[derive(Debug, Clone, Default)]
pub struct Rule {
    /// Name used in diagnostics
    pub name: String,
    /// Tests on the previous token
    pub before: PredicateGroup,
    /// Tests on the current token
    pub current: PredicateGroup,
    /// Tests on the next token
    pub after: PredicateGroup,
    /// Length checks
    pub length: LengthConstraints,
    /// Where the effect goes
    pub insert: InsertPolicy,
}

impl Rule {
    /// Create a rule that matches every context
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a matcher on the previous token
    pub fn before(mut self, field: FieldName, matcher: FieldMatcher) -> Self {
        self.before.push(field, matcher);
        self
    }

    /// Add a matcher on the current token
    pub fn current(mut self, field: FieldName, matcher: FieldMatcher) -> Self {
        self.current.push(field, matcher);
        self
    }

    /// Add a matcher on the next token
    pub fn after(mut self, field: FieldName, matcher: FieldMatcher) -> Self {
        self.after.push(field, matcher);
        self
    }

    /// Bound the surface length of the current token
    pub fn current_length(mut self, bound: LengthBound) -> Self {
        self.length.current = Some(bound);
        self
    }

    /// Bound the surface length of the next token
    pub fn after_length(mut self, bound: LengthBound) -> Self {
        self.length.after = Some(bound);
        self
    }

    /// Bound the backward distance
    pub fn past_length(mut self, bound: LengthBound, from_line_start: bool) -> Self {
        self.length.past = Some(bound);
        self.length.past_from_line_start = from_line_start;
        self
    }

    /// Bound the forward distance
    pub fn remaining_length(mut self, bound: LengthBound, to_line_end: bool) -> Self {
        self.length.remaining = Some(bound);
        self.length.remaining_to_line_end = to_line_end;
        self
    }

    /// Set the insert policy
    pub fn insert(mut self, policy: InsertPolicy) -> Self {
        self.insert = policy;
        self
    }

    /// Full match of every group and the length checks attached to them
    pub fn matches(&self, ctx: &MatchContext<'_>) -> bool {
        self.before.matches(ctx.before)
            && self.current.matches(Some(ctx.current))
            && (self.current.is_empty() || self.length.current_side_holds(ctx))
            && self.after.matches(ctx.after)
            && (self.after.is_empty() || self.length.after_side_holds(ctx))
    }
}

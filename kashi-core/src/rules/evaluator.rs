//! First-match evaluation of an ordered rule table

use super::rule::{InsertPolicy, Rule};
use crate::context::MatchContext;

/// Ordered list of rules; the first full match wins
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    name: String,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table from rules in evaluation order
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// An empty table, which never matches
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Name of the table
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a rule at the lowest priority
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// First rule that fully matches `ctx`
    ///
    /// Nothing matches when the next token contains a closing bracket. On the
    /// last token of a span only a [`InsertPolicy::Before`] first match
    /// survives.
    pub fn first_match(&self, ctx: &MatchContext<'_>) -> Option<&Rule> {
        if ctx.after_is_closing {
            return None;
        }
        let rule = self.rules.iter().find(|rule| rule.matches(ctx))?;
        if ctx.is_last_token && rule.insert == InsertPolicy::Current {
            return None;
        }
        Some(rule)
    }
}

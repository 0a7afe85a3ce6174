//! Per-token evaluation context
//!
//! A [`ContextBuilder`] is created once per span. It remembers where the
//! spaces of the analysed text are and where the span's tokens start and end,
//! then hands out a [`MatchContext`] for each token position.

use crate::enclosure::EnclosureSet;
use crate::token::FeatureToken;

/// Three-token window plus derived length measures
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Previous token in the span
    pub before: Option<&'a FeatureToken>,
    /// Token under evaluation
    pub current: &'a FeatureToken,
    /// Next token in the span
    pub after: Option<&'a FeatureToken>,
    /// Characters since the last registered break, if any break happened
    pub past_since_break: Option<usize>,
    /// Characters from the first token of the span to the current token
    pub past_from_line_start: usize,
    /// Characters from the end of the current token to the next space
    pub remaining_to_next_space: Option<usize>,
    /// Characters from the end of the current token to the end of the span
    pub remaining_to_line_end: usize,
    /// Current token is the last one of the span
    pub is_last_token: bool,
    /// The next token is the last one of the span (or there is none)
    pub next_is_last: bool,
    /// The next token contains a closing bracket
    pub after_is_closing: bool,
}

impl<'a> MatchContext<'a> {
    /// Context for a lone token, with every measure at zero
    pub fn single(current: &'a FeatureToken) -> Self {
        Self {
            before: None,
            current,
            after: None,
            past_since_break: None,
            past_from_line_start: 0,
            remaining_to_next_space: None,
            remaining_to_line_end: 0,
            is_last_token: true,
            next_is_last: true,
            after_is_closing: false,
        }
    }

    /// Backward distance a `past` length check compares against
    pub fn past(&self, from_line_start: bool) -> usize {
        match self.past_since_break {
            Some(distance) if !from_line_start => distance,
            _ => self.past_from_line_start,
        }
    }

    /// Forward distance a `remaining` length check compares against
    pub fn remaining(&self, to_line_end: bool) -> usize {
        match self.remaining_to_next_space {
            Some(distance) if !to_line_end => distance,
            _ => self.remaining_to_line_end,
        }
    }
}

/// Builds [`MatchContext`]s for the tokens of one span
#[derive(Debug)]
pub struct ContextBuilder<'a> {
    tokens: &'a [FeatureToken],
    enclosures: &'a EnclosureSet,
    /// Character indices of `' '` in the analysed text, ascending
    spaces: Vec<usize>,
    line_start: usize,
    line_end: usize,
}

impl<'a> ContextBuilder<'a> {
    /// Prepare context building for `tokens`, which were produced from `text`
    pub fn new(tokens: &'a [FeatureToken], text: &str, enclosures: &'a EnclosureSet) -> Self {
        let spaces = text
            .chars()
            .enumerate()
            .filter_map(|(i, c)| (c == ' ').then_some(i))
            .collect();
        let line_start = tokens.first().map_or(0, |t| t.word_position);
        let line_end = tokens.last().map_or(0, FeatureToken::end_position);

        Self {
            tokens,
            enclosures,
            spaces,
            line_start,
            line_end,
        }
    }

    /// Number of tokens in the span
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the span has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Context for the token at `position`
    ///
    /// `last_break_column` is the column of the most recent break registered
    /// in this span. Returns `None` when `position` is out of range.
    pub fn context(&self, position: usize, last_break_column: Option<usize>) -> Option<MatchContext<'a>> {
        let current = self.tokens.get(position)?;
        let before = position.checked_sub(1).and_then(|p| self.tokens.get(p));
        let after = self.tokens.get(position + 1);

        let column = current.word_position;
        let end = current.end_position();

        let next_space = self.spaces.partition_point(|&s| s < end);
        let remaining_to_next_space = self.spaces.get(next_space).map(|&s| s - end);

        Some(MatchContext {
            before,
            current,
            after,
            past_since_break: last_break_column.map(|c| column.saturating_sub(c)),
            past_from_line_start: column.saturating_sub(self.line_start),
            remaining_to_next_space,
            remaining_to_line_end: self.line_end.saturating_sub(end),
            is_last_token: position + 1 == self.tokens.len(),
            next_is_last: self.tokens.get(position + 2).is_none(),
            after_is_closing: after.is_some_and(|t| self.enclosures.contains_closing(&t.surface_form)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(surfaces: &[&str]) -> Vec<FeatureToken> {
        let mut position = 0;
        surfaces
            .iter()
            .map(|s| {
                let token = FeatureToken::new(*s, position);
                position += s.chars().count();
                token
            })
            .collect()
    }

    #[test]
    fn test_window_and_flags() {
        let text = "Oh, I can";
        let tokens = tokens(&["Oh", ",", " ", "I", " ", "can"]);
        let set = EnclosureSet::default();
        let builder = ContextBuilder::new(&tokens, text, &set);

        let first = builder.context(0, None).unwrap();
        assert!(first.before.is_none());
        assert_eq!(first.after.map(|t| t.surface_form.as_str()), Some(","));
        assert!(!first.is_last_token);
        assert!(!first.next_is_last);

        let fifth = builder.context(4, None).unwrap();
        assert!(fifth.next_is_last);
        assert!(!fifth.is_last_token);

        let last = builder.context(5, None).unwrap();
        assert!(last.is_last_token);
        assert!(last.next_is_last);
        assert!(last.after.is_none());

        assert!(builder.context(6, None).is_none());
    }

    #[test]
    fn test_length_measures() {
        let text = "Oh, I can";
        let tokens = tokens(&["Oh", ",", " ", "I", " ", "can"]);
        let set = EnclosureSet::default();
        let builder = ContextBuilder::new(&tokens, text, &set);

        let ctx = builder.context(0, None).unwrap();
        assert_eq!(ctx.remaining_to_next_space, Some(1));
        assert_eq!(ctx.remaining_to_line_end, 7);
        assert_eq!(ctx.past_from_line_start, 0);
        assert_eq!(ctx.past_since_break, None);

        let ctx = builder.context(3, Some(3)).unwrap();
        assert_eq!(ctx.past_since_break, Some(1));
        assert_eq!(ctx.past_from_line_start, 4);
        assert_eq!(ctx.remaining_to_next_space, Some(0));

        let ctx = builder.context(5, Some(3)).unwrap();
        assert_eq!(ctx.remaining_to_next_space, None);
        assert_eq!(ctx.remaining_to_line_end, 0);
    }

    #[test]
    fn test_effective_measures() {
        let token = FeatureToken::new("花", 4);
        let ctx = MatchContext {
            past_since_break: Some(2),
            past_from_line_start: 4,
            remaining_to_next_space: Some(3),
            remaining_to_line_end: 9,
            ..MatchContext::single(&token)
        };

        assert_eq!(ctx.past(false), 2);
        assert_eq!(ctx.past(true), 4);
        assert_eq!(ctx.remaining(false), 3);
        assert_eq!(ctx.remaining(true), 9);

        let fresh = MatchContext {
            past_since_break: None,
            remaining_to_next_space: None,
            ..ctx
        };
        assert_eq!(fresh.past(false), 4);
        assert_eq!(fresh.remaining(false), 9);
    }

    #[test]
    fn test_after_is_closing() {
        let text = "(君)だ";
        let tokens = tokens(&["(", "君", ")", "だ"]);
        let set = EnclosureSet::default();
        let builder = ContextBuilder::new(&tokens, text, &set);

        assert!(builder.context(1, None).unwrap().after_is_closing);
        assert!(!builder.context(2, None).unwrap().after_is_closing);
    }
}

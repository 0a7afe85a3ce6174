//! Per-span segmentation
//!
//! Folds over the aligned tokens of one span, asks the break and whitespace
//! tables about each position and emits timed units. The most recent unit is
//! held back until its successor is known, because a later token may still set
//! its line-break flag.

use crate::config::EngineConfig;
use crate::error::Result;
use kashi_core::{
    ContextBuilder, EnclosureIndex, EnclosureSet, FeatureToken, InsertPolicy, Line, MatchContext,
    SegmentationUnit, TimedSpan, TimingInterpolator,
};
use tracing::{debug, trace};

/// Assembles [`Line`]s from aligned tokens
#[derive(Debug)]
pub struct SpanAssembler<'a> {
    config: &'a EngineConfig,
    enclosures: &'a EnclosureSet,
}

impl<'a> SpanAssembler<'a> {
    /// Create an assembler over a configuration and its enclosure table
    pub fn new(config: &'a EngineConfig, enclosures: &'a EnclosureSet) -> Self {
        Self { config, enclosures }
    }

    /// Segment one span
    ///
    /// `prepared` is the text the tokens were produced from; `span.text` is
    /// only used for timing.
    pub fn assemble(
        &self,
        index: usize,
        span: &TimedSpan,
        prepared: &str,
        tokens: &[FeatureToken],
    ) -> Result<Line> {
        let mut timing = TimingInterpolator::for_span(span, index)?;
        let mut line = Line {
            position: index + 1,
            span_id: span.id.clone(),
            units: Vec::with_capacity(tokens.len()),
        };
        if tokens.is_empty() {
            debug!(target: "kashi::assembler", span = index, "span has no tokens");
            return Ok(line);
        }

        let ranges = self.enclosures.scan(prepared);
        let builder = ContextBuilder::new(tokens, prepared, self.enclosures);
        let mut pending: Option<SegmentationUnit> = None;
        let mut last_break_column: Option<usize> = None;

        for position in 0..builder.len() {
            let Some(ctx) = builder.context(position, last_break_column) else {
                break;
            };
            let token = ctx.current;

            let break_rule = self.config.break_rules.first_match(&ctx);
            let whitespace_rule = self.config.whitespace_rules.first_match(&ctx);

            let mut policy = break_rule.map(|rule| rule.insert);
            if policy.is_none() && self.closes_before_non_latin(&ctx, &ranges) {
                policy = Some(InsertPolicy::Current);
            }

            let enclosed = ranges.encloses(token.word_position, self.config.max_enclosed_chars);
            if enclosed && policy.is_some() {
                trace!(
                    target: "kashi::assembler",
                    span = index,
                    position,
                    token = %token.surface_form,
                    "break suppressed inside enclosure"
                );
                policy = None;
            }

            trace!(
                target: "kashi::assembler",
                span = index,
                position,
                token = %token.surface_form,
                past_since_break = ?ctx.past_since_break,
                past_from_line_start = ctx.past_from_line_start,
                remaining_to_next_space = ?ctx.remaining_to_next_space,
                remaining_to_line_end = ctx.remaining_to_line_end,
                next_is_last = ctx.next_is_last,
                break_rule = break_rule.map(|r| r.name.as_str()),
                whitespace_rule = whitespace_rule.map(|r| r.name.as_str()),
                ?policy,
                enclosed,
            );

            if let Some(policy) = policy {
                last_break_column = Some(match policy {
                    InsertPolicy::Current => token.end_position(),
                    InsertPolicy::Before => token.word_position,
                });
            }

            let whitespace = token.is_whitespace();
            if policy == Some(InsertPolicy::Before) || (whitespace && policy.is_some()) {
                if let Some(unit) = pending.as_mut() {
                    unit.has_new_line = true;
                }
            }
            if whitespace {
                continue;
            }

            let (begin, end) = timing.next_unit(&token.surface_form);
            let unit = SegmentationUnit {
                text: token.surface_form.clone(),
                begin,
                end,
                has_new_line: policy == Some(InsertPolicy::Current),
                has_whitespace: whitespace_rule.is_some(),
            };
            if let Some(done) = pending.replace(unit) {
                line.units.push(done);
            }
        }

        if let Some(mut last) = pending {
            last.end = timing.span_end();
            line.units.push(last);
        }

        debug!(
            target: "kashi::assembler",
            span = index,
            tokens = tokens.len(),
            units = line.units.len(),
            breaks = line.units.iter().filter(|u| u.has_new_line).count(),
            "span segmented"
        );
        Ok(line)
    }

    /// Token sits on the closing bracket of a range and the next token holds
    /// no ASCII letters or digits
    fn closes_before_non_latin(&self, ctx: &MatchContext<'_>, ranges: &EnclosureIndex) -> bool {
        if !self.config.close_enclosure_break || !ranges.closes_at(ctx.current.word_position) {
            return false;
        }
        ctx.after
            .is_some_and(|next| !next.surface_form.chars().any(|c| c.is_ascii_alphanumeric()))
    }
}

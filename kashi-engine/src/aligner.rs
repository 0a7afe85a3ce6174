//! Re-synchronise tokenizer output with the spans it came from
//!
//! Tokenization is per span, but an analyzer does not always reproduce the
//! span text exactly. Once the tokens collected for a span spell out its
//! prepared text, any further tokens from the same call move on to the next
//! span in line, with their positions rebased onto that span's text. Tokens
//! with no span left to go to are dropped.

use kashi_core::FeatureToken;
use tracing::debug;

/// Tokens assigned to one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSpan {
    /// Position of the span in the input sequence
    pub span_index: usize,
    /// Tokens in order
    pub tokens: Vec<FeatureToken>,
}

/// Assign the per-span token lists to spans
///
/// `prepared` holds the text each span was tokenized from; `token_lists[i]`
/// is the tokenizer output for `prepared[i]`. Returns one entry per span.
pub fn align<S: AsRef<str>>(prepared: &[S], token_lists: Vec<Vec<FeatureToken>>) -> Vec<AlignedSpan> {
    let span_count = prepared.len();
    let mut aligned: Vec<Vec<FeatureToken>> = vec![Vec::new(); span_count];

    for (index, tokens) in token_lists.into_iter().enumerate() {
        if index >= span_count {
            debug!(
                target: "kashi::aligner",
                index,
                dropped = tokens.len(),
                "token list without a span"
            );
            continue;
        }

        if tokens.is_empty() {
            continue;
        }
        // The span's own first token opens a fresh accumulation
        let spilled = std::mem::take(&mut aligned[index]);
        if !spilled.is_empty() {
            debug!(
                target: "kashi::aligner",
                index,
                discarded = spilled.len(),
                "span tokens replace spill-over from the previous span"
            );
        }

        let mut target = index;
        let mut text = String::new();
        // Characters of the spans already completed by this list
        let mut offset = 0usize;
        let mut dropped = 0usize;

        for (i, mut token) in tokens.into_iter().enumerate() {
            if i > 0 && target < span_count && text == prepared[target].as_ref() {
                target += 1;
                offset += text.chars().count();
                text.clear();
                if let Some(next) = aligned.get_mut(target) {
                    next.clear();
                }
            }
            match aligned.get_mut(target) {
                Some(slot) => {
                    token.word_position = token.word_position.saturating_sub(offset);
                    text.push_str(&token.surface_form);
                    slot.push(token);
                }
                None => dropped += 1,
            }
        }

        if target != index {
            debug!(
                target: "kashi::aligner",
                index,
                spilled_to = target,
                "tokenizer output ran past its span"
            );
        }
        if dropped > 0 {
            debug!(target: "kashi::aligner", index, dropped, "tokens without a span dropped");
        }
    }

    aligned
        .into_iter()
        .enumerate()
        .map(|(span_index, tokens)| AlignedSpan { span_index, tokens })
        .collect()
}

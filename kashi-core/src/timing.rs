//! Proportional timing for units of a span

use crate::error::Result;
use crate::span::TimedSpan;

/// Round to millisecond precision
#[inline]
pub fn round_ms(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Hands out consecutive `(begin, end)` pairs for the units of one span
///
/// Each unit gets `per_char * chars(unit)` seconds, starting where the
/// previous unit ended. The caller pins the last unit to [`Self::span_end`].
#[derive(Debug, Clone)]
pub struct TimingInterpolator {
    per_char: f64,
    cursor: f64,
    span_end: f64,
}

impl TimingInterpolator {
    /// Prepare timing for `span`, failing on a precondition violation
    pub fn for_span(span: &TimedSpan, index: usize) -> Result<Self> {
        span.validate(index)?;
        let per_char = round_ms((span.end - span.begin) / span.visible_chars() as f64);
        Ok(Self {
            per_char,
            cursor: span.begin,
            span_end: span.end,
        })
    }

    /// Seconds allotted per character
    pub fn per_char(&self) -> f64 {
        self.per_char
    }

    /// End time of the span
    pub fn span_end(&self) -> f64 {
        self.span_end
    }

    /// Timing for the next unit with text `text`
    pub fn next_unit(&mut self, text: &str) -> (f64, f64) {
        let begin = self.cursor;
        let duration = self.per_char * text.chars().count() as f64;
        let end = round_ms(begin + duration);
        self.cursor = end;
        (begin, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ms() {
        assert_eq!(round_ms(0.33333), 0.333);
        assert_eq!(round_ms(1.2344), 1.234);
        assert_eq!(round_ms(2.0), 2.0);
    }

    #[test]
    fn test_per_char_ignores_whitespace() {
        let span = TimedSpan::new("ab cd", 0.0, 2.0);
        let timing = TimingInterpolator::for_span(&span, 0).unwrap();
        assert_eq!(timing.per_char(), 0.5);
    }

    #[test]
    fn test_consecutive_units() {
        let span = TimedSpan::new("あの花が", 1.0, 5.0);
        let mut timing = TimingInterpolator::for_span(&span, 0).unwrap();

        assert_eq!(timing.next_unit("あの"), (1.0, 3.0));
        assert_eq!(timing.next_unit("花"), (3.0, 4.0));
        assert_eq!(timing.next_unit("が"), (4.0, 5.0));
        assert_eq!(timing.span_end(), 5.0);
    }

    #[test]
    fn test_rounding_is_millisecond() {
        let span = TimedSpan::new("abc", 0.0, 1.0);
        let mut timing = TimingInterpolator::for_span(&span, 0).unwrap();
        assert_eq!(timing.per_char(), 0.333);
        assert_eq!(timing.next_unit("a"), (0.0, 0.333));
        assert_eq!(timing.next_unit("b"), (0.333, 0.666));
    }

    #[test]
    fn test_invalid_span_fails_fast() {
        let span = TimedSpan::new("   ", 0.0, 1.0);
        assert!(TimingInterpolator::for_span(&span, 0).is_err());
    }
}

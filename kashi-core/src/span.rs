//! Timed input spans and segmented output
//!
//! [`TimedSpan`] is what the host timeline hands in; [`SegmentationUnit`] and
//! [`Line`] are what the engine hands back.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A chunk of text with a start and end time, e.g. one sung lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSpan {
    /// Opaque host identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw text of the span
    pub text: String,
    /// Start time in seconds
    pub begin: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimedSpan {
    /// Create a span without an identifier
    pub fn new(text: impl Into<String>, begin: f64, end: f64) -> Self {
        Self {
            id: None,
            text: text.into(),
            begin,
            end,
        }
    }

    /// Attach a host identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of characters that are not whitespace
    pub fn visible_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    /// Check the caller preconditions for segmenting this span
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| CoreError::InvalidSpan { index, reason };

        if !self.begin.is_finite() || !self.end.is_finite() {
            return Err(invalid(format!(
                "timing must be finite (begin={}, end={})",
                self.begin, self.end
            )));
        }
        if self.end < self.begin {
            return Err(invalid(format!(
                "end {} is before begin {}",
                self.end, self.begin
            )));
        }
        if self.text.is_empty() {
            return Err(invalid("text is empty".to_string()));
        }
        if self.visible_chars() == 0 {
            return Err(invalid("text has no non-whitespace characters".to_string()));
        }
        Ok(())
    }
}

/// One emitted sub-word segment with its own timing and placement flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationUnit {
    /// Text of the unit
    pub text: String,
    /// Start time in seconds
    pub begin: f64,
    /// End time in seconds
    pub end: f64,
    /// Insert a line break after this unit
    pub has_new_line: bool,
    /// Insert a visible whitespace after this unit
    pub has_whitespace: bool,
}

/// Units that share one originating span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based position of the originating span
    pub position: usize,
    /// Identifier of the originating span, if the host gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    /// Units in display order
    pub units: Vec<SegmentationUnit>,
}

impl Line {
    /// Start of the first unit
    pub fn begin(&self) -> Option<f64> {
        self.units.first().map(|u| u.begin)
    }

    /// End of the last unit
    pub fn end(&self) -> Option<f64> {
        self.units.last().map(|u| u.end)
    }

    /// Unit texts joined with a space wherever `has_whitespace` is set
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, unit) in self.units.iter().enumerate() {
            out.push_str(&unit.text);
            if unit.has_whitespace && i + 1 < self.units.len() {
                out.push(' ');
            }
        }
        out
    }

    /// Render for display: `\n` after break units, a space after whitespace units
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, unit) in self.units.iter().enumerate() {
            out.push_str(&unit.text);
            if i + 1 == self.units.len() {
                break;
            }
            if unit.has_new_line {
                out.push('\n');
            } else if unit.has_whitespace {
                out.push(' ');
            }
        }
        out
    }

    /// Split the units into visual rows, ending a row after every break unit
    pub fn rows(&self) -> Vec<&[SegmentationUnit]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for (i, unit) in self.units.iter().enumerate() {
            if unit.has_new_line {
                rows.push(&self.units[start..=i]);
                start = i + 1;
            }
        }
        if start < self.units.len() {
            rows.push(&self.units[start..]);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(text: &str, has_new_line: bool, has_whitespace: bool) -> SegmentationUnit {
        SegmentationUnit {
            text: text.to_string(),
            begin: 0.0,
            end: 0.0,
            has_new_line,
            has_whitespace,
        }
    }

    #[test]
    fn test_validate_rejects_reversed_timing() {
        let err = TimedSpan::new("abc", 2.0, 1.0).validate(3).unwrap_err();
        match err {
            CoreError::InvalidSpan { index, .. } => assert_eq!(index, 3),
            other => panic!("Expected InvalidSpan, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        assert!(TimedSpan::new("", 0.0, 1.0).validate(0).is_err());
        assert!(TimedSpan::new("  \u{3000}", 0.0, 1.0).validate(0).is_err());
        assert!(TimedSpan::new("a", f64::NAN, 1.0).validate(0).is_err());
    }

    #[test]
    fn test_validate_accepts_zero_duration() {
        assert!(TimedSpan::new("a b", 1.0, 1.0).validate(0).is_ok());
    }

    #[test]
    fn test_render_prefers_break_over_space() {
        let line = Line {
            position: 1,
            span_id: None,
            units: vec![
                unit("Oh", false, false),
                unit(",", true, true),
                unit("I", false, true),
                unit("can", false, false),
            ],
        };

        assert_eq!(line.render(), "Oh,\nI can");
        assert_eq!(line.text(), "Oh, I can");
    }

    #[test]
    fn test_rows_split_after_breaks() {
        let line = Line {
            position: 1,
            span_id: None,
            units: vec![
                unit("あの", false, false),
                unit("花が", true, false),
                unit("咲い", false, false),
                unit("た", true, false),
            ],
        };

        let rows: Vec<String> = line
            .rows()
            .iter()
            .map(|row| row.iter().map(|u| u.text.as_str()).collect())
            .collect();
        assert_eq!(rows, vec!["あの花が", "咲いた"]);
    }

    #[test]
    fn test_empty_line() {
        let line = Line {
            position: 2,
            span_id: None,
            units: Vec::new(),
        };
        assert_eq!(line.begin(), None);
        assert_eq!(line.render(), "");
        assert!(line.rows().is_empty());
    }
}

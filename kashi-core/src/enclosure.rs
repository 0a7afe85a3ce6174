//! Bracket and quote ranges over a span's text
//!
//! Ranges are computed once per span and looked up per token.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a delimiter character
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Delimiter {
    Open,
    Close,
    /// Same character opens and closes
    Quote,
}

/// Opening and closing characters the engine recognizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosureConfig {
    /// Opening brackets; any of them pairs with the first following closer
    pub open: Vec<char>,
    /// Closing brackets
    pub close: Vec<char>,
    /// Symmetric quote characters
    #[serde(default)]
    pub quotes: Vec<char>,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            open: vec!['[', '(', '（', '「', '『', '【', '〝', '❝', '“'],
            close: vec![']', ')', '）', '」', '』', '】', '〟', '❞', '”'],
            quotes: vec!['"', '\'', '`'],
        }
    }
}

/// Character lookup table built from an [`EnclosureConfig`]
#[derive(Debug, Clone)]
pub struct EnclosureSet {
    map: HashMap<char, Delimiter>,
}

impl EnclosureSet {
    /// Build the lookup table
    pub fn new(config: &EnclosureConfig) -> Self {
        let mut map = HashMap::new();
        for &ch in &config.open {
            map.insert(ch, Delimiter::Open);
        }
        for &ch in &config.close {
            map.insert(ch, Delimiter::Close);
        }
        // Quotes win when a character is listed twice
        for &ch in &config.quotes {
            map.insert(ch, Delimiter::Quote);
        }
        Self { map }
    }

    /// True for a closing bracket character
    #[inline]
    pub fn is_closing(&self, ch: char) -> bool {
        self.map.get(&ch) == Some(&Delimiter::Close)
    }

    /// True when `text` contains any closing bracket character
    pub fn contains_closing(&self, text: &str) -> bool {
        text.chars().any(|ch| self.is_closing(ch))
    }

    /// Find every bracket pair and quote pair in `text`
    pub fn scan(&self, text: &str) -> EnclosureIndex {
        let chars: Vec<char> = text.chars().collect();
        let mut ranges = Vec::new();

        // Brackets: an opener, then the first closer of any kind
        let mut i = 0;
        while i < chars.len() {
            if self.map.get(&chars[i]) == Some(&Delimiter::Open) {
                if let Some(offset) = chars[i + 1..].iter().position(|&c| self.is_closing(c)) {
                    let close = i + 1 + offset;
                    ranges.push(EnclosureRange { open: i, close });
                    i = close + 1;
                    continue;
                }
            }
            i += 1;
        }

        // Quotes: the same character on both ends
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if self.map.get(&ch) == Some(&Delimiter::Quote) {
                if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ch) {
                    let close = i + 1 + offset;
                    ranges.push(EnclosureRange { open: i, close });
                    i = close + 1;
                    continue;
                }
            }
            i += 1;
        }

        EnclosureIndex::new(ranges)
    }
}

impl Default for EnclosureSet {
    fn default() -> Self {
        Self::new(&EnclosureConfig::default())
    }
}

/// A matched delimiter pair, in character indices
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnclosureRange {
    /// Index of the opening delimiter
    pub open: usize,
    /// Index of the closing delimiter
    pub close: usize,
}

impl EnclosureRange {
    /// Number of characters between the delimiters
    #[inline]
    pub fn inner_len(&self) -> usize {
        self.close - self.open - 1
    }

    /// True when `column` is one of the enclosed characters
    #[inline]
    pub fn encloses(&self, column: usize) -> bool {
        self.open < column && column < self.close
    }
}

/// Sorted enclosure ranges of one span
#[derive(Debug, Clone, Default)]
pub struct EnclosureIndex {
    /// Sorted by opening index
    ranges: Vec<EnclosureRange>,
    /// Sorted closing indices
    closes: Vec<usize>,
}

impl EnclosureIndex {
    fn new(mut ranges: Vec<EnclosureRange>) -> Self {
        ranges.sort_by_key(|r| (r.open, r.close));
        let mut closes: Vec<usize> = ranges.iter().map(|r| r.close).collect();
        closes.sort_unstable();
        Self { ranges, closes }
    }

    /// All ranges, ordered by opening index
    pub fn ranges(&self) -> &[EnclosureRange] {
        &self.ranges
    }

    /// True when no pair was found
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// True when `column` is enclosed by a range whose inner text has at most
    /// `max_inner` characters (any length when `None`)
    pub fn encloses(&self, column: usize, max_inner: Option<usize>) -> bool {
        let candidates = self.ranges.partition_point(|r| r.open < column);
        self.ranges[..candidates]
            .iter()
            .filter(|r| r.encloses(column))
            .any(|r| max_inner.map_or(true, |max| r.inner_len() <= max))
    }

    /// True when a range closes at `column`
    pub fn closes_at(&self, column: usize) -> bool {
        self.closes.binary_search(&column).is_ok()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scanned_ranges_are_well_formed(text in "[ab、()「」\"']{0,24}") {
            let set = EnclosureSet::default();
            let chars: Vec<char> = text.chars().collect();
            let index = set.scan(&text);

            for range in index.ranges() {
                prop_assert!(range.open < range.close);
                prop_assert!(range.close < chars.len());

                let (open, close) = (chars[range.open], chars[range.close]);
                let inner = &chars[range.open + 1..range.close];
                match set.map.get(&open) {
                    Some(Delimiter::Open) => {
                        prop_assert!(set.is_closing(close));
                        prop_assert!(!inner.iter().any(|&c| set.is_closing(c)));
                    }
                    Some(Delimiter::Quote) => {
                        prop_assert_eq!(open, close);
                        prop_assert!(!inner.contains(&open));
                    }
                    other => prop_assert!(false, "range opens on {:?} ({:?})", open, other),
                }
            }
        }

        #[test]
        fn lookups_agree_with_ranges(text in "[ab、()「」\"']{0,24}", max in 0usize..6) {
            let index = EnclosureSet::default().scan(&text);

            for column in 0..text.chars().count() {
                let inside = index.ranges().iter().any(|r| r.encloses(column));
                prop_assert_eq!(index.encloses(column, None), inside);
                if index.encloses(column, Some(max)) {
                    prop_assert!(inside);
                }

                let closes = index.ranges().iter().any(|r| r.close == column);
                prop_assert_eq!(index.closes_at(column), closes);
            }
        }
    }
}

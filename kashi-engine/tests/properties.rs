//! Invariants that hold for any input

mod common;

use common::by_char;
use kashi_engine::{Line, Segmenter, TimedSpan};
use proptest::prelude::*;

const VISIBLE: &[char] = &[
    'あ', 'の', 'が', 'ア', 'イ', '花', '種', 'a', 'b', 'I', 'Z', '1', ',', '、', '。', '!', '？',
    '(', ')', '「', '」', '\'', 'ー',
];

fn visible_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VISIBLE.to_vec()), 1..20)
        .prop_map(|chars| chars.into_iter().collect())
}

fn spaced_text() -> impl Strategy<Value = String> {
    let mut chars = VISIBLE.to_vec();
    chars.push(' ');
    prop::collection::vec(prop::sample::select(chars), 1..20)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .prop_filter("needs a visible character", |text| {
            text.chars().any(|c| !c.is_whitespace())
        })
}

fn timing() -> impl Strategy<Value = (f64, f64)> {
    (0u32..100_000, 1_000u32..10_000)
        .prop_map(|(begin, length)| (begin as f64 / 1000.0, (begin + length) as f64 / 1000.0))
}

fn segment(text: &str, begin: f64, end: f64) -> Line {
    let segmenter = Segmenter::builder()
        .substitutions(Vec::new())
        .build()
        .unwrap();
    let mut lines = segmenter
        .segment(&by_char, &[TimedSpan::new(text, begin, end)])
        .unwrap();
    lines.remove(0)
}

proptest! {
    #[test]
    fn text_round_trips(text in visible_text(), (begin, end) in timing()) {
        let line = segment(&text, begin, end);
        prop_assert_eq!(line.text(), text);
    }

    #[test]
    fn units_skip_whitespace(text in spaced_text(), (begin, end) in timing()) {
        let line = segment(&text, begin, end);
        let joined: String = line.units.iter().map(|u| u.text.as_str()).collect();
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(joined, expected);
    }

    #[test]
    fn timing_is_continuous(text in spaced_text(), (begin, end) in timing()) {
        let line = segment(&text, begin, end);

        prop_assert_eq!(line.begin(), Some(begin));
        prop_assert_eq!(line.end(), Some(end));
        for pair in line.units.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].begin);
        }
        for unit in &line.units {
            prop_assert!(unit.begin <= unit.end);
        }
    }

    #[test]
    fn last_unit_never_breaks(text in visible_text(), (begin, end) in timing()) {
        let line = segment(&text, begin, end);
        let last = line.units.last().unwrap();
        prop_assert!(!last.has_new_line);
    }

    #[test]
    fn segmentation_is_deterministic(text in spaced_text(), (begin, end) in timing()) {
        prop_assert_eq!(segment(&text, begin, end), segment(&text, begin, end));
    }
}

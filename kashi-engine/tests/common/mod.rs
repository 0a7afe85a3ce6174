//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use kashi_engine::{FeatureToken, Tokenizer, TokenizerError};
use std::collections::HashMap;

/// Looks analyses up in a fixed table of `(surface, IPADIC features)` lists
///
/// Positions are derived from the surface lengths, so the fixtures only need
/// to list tokens in order.
#[derive(Debug, Default)]
pub struct FixtureTokenizer {
    table: HashMap<String, Vec<(String, String)>>,
}

impl FixtureTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, tokens: &[(&str, &str)]) -> Self {
        let tokens = tokens
            .iter()
            .map(|(surface, features)| (surface.to_string(), features.to_string()))
            .collect();
        self.table.insert(text.to_string(), tokens);
        self
    }

    /// Every fixture defined in this module
    pub fn lyrics() -> Self {
        Self::new()
            .with(FLOWER, FLOWER_TOKENS)
            .with(FALLING, FALLING_TOKENS)
            .with(ONLY_YOU, ONLY_YOU_TOKENS)
    }
}

impl Tokenizer for FixtureTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<FeatureToken>, TokenizerError> {
        let entries = self
            .table
            .get(text)
            .ok_or_else(|| TokenizerError::new(format!("no fixture for '{text}'")))?;
        Ok(positioned(entries.iter().map(|(s, f)| (s.as_str(), f.as_str()))))
    }
}

/// Build tokens with consecutive character positions
pub fn positioned<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<FeatureToken> {
    let mut position = 0;
    entries
        .into_iter()
        .map(|(surface, features)| {
            let token = FeatureToken::from_ipadic(surface, position, features);
            position += surface.chars().count();
            token
        })
        .collect()
}

/// One token per character, no features
pub fn by_char(text: &str) -> Vec<FeatureToken> {
    text.chars()
        .enumerate()
        .map(|(i, c)| FeatureToken::new(c.to_string(), i))
        .collect()
}

pub const FLOWER: &str = "あの花が咲いたのは、そこに種が落ちたからで";

pub const FLOWER_TOKENS: &[(&str, &str)] = &[
    ("あの", "連体詞,*,*,*,*,*,あの,アノ,アノ"),
    ("花", "名詞,一般,*,*,*,*,花,ハナ,ハナ"),
    ("が", "助詞,格助詞,一般,*,*,*,が,ガ,ガ"),
    ("咲い", "動詞,自立,*,*,五段・カ行イ音便,連用タ接続,咲く,サイ,サイ"),
    ("た", "助動詞,*,*,*,特殊・タ,基本形,た,タ,タ"),
    ("の", "名詞,非自立,一般,*,*,*,の,ノ,ノ"),
    ("は", "助詞,係助詞,*,*,*,*,は,ハ,ワ"),
    ("、", "記号,読点,*,*,*,*,、,、,、"),
    ("そこ", "名詞,代名詞,一般,*,*,*,そこ,ソコ,ソコ"),
    ("に", "助詞,格助詞,一般,*,*,*,に,ニ,ニ"),
    ("種", "名詞,一般,*,*,*,*,種,タネ,タネ"),
    ("が", "助詞,格助詞,一般,*,*,*,が,ガ,ガ"),
    ("落ち", "動詞,自立,*,*,一段,連用形,落ちる,オチ,オチ"),
    ("た", "助動詞,*,*,*,特殊・タ,基本形,た,タ,タ"),
    ("から", "助詞,接続助詞,*,*,*,*,から,カラ,カラ"),
    ("で", "助動詞,*,*,*,特殊・ダ,連用形,だ,デ,デ"),
];

pub const FALLING: &str = "Oh, I can't help falling in love with you";

const WORD: &str = "名詞,固有名詞,組織,*,*,*,*";
const SYMBOL: &str = "記号,一般,*,*,*,*,*";
const SPACE: &str = "記号,空白,*,*,*,*,*";

pub const FALLING_TOKENS: &[(&str, &str)] = &[
    ("Oh", WORD),
    (",", SYMBOL),
    (" ", SPACE),
    ("I", WORD),
    (" ", SPACE),
    ("can", WORD),
    ("'", SYMBOL),
    ("t", WORD),
    (" ", SPACE),
    ("help", WORD),
    (" ", SPACE),
    ("falling", WORD),
    (" ", SPACE),
    ("in", WORD),
    (" ", SPACE),
    ("love", WORD),
    (" ", SPACE),
    ("with", WORD),
    (" ", SPACE),
    ("you", WORD),
];

pub const ONLY_YOU: &str = "(あなただけ、あなただけ)";

pub const ONLY_YOU_TOKENS: &[(&str, &str)] = &[
    ("(", "記号,括弧開,*,*,*,*,(,(,("),
    ("あなた", "名詞,代名詞,一般,*,*,*,あなた,アナタ,アナタ"),
    ("だけ", "助詞,副助詞,*,*,*,*,だけ,ダケ,ダケ"),
    ("、", "記号,読点,*,*,*,*,、,、,、"),
    ("あなた", "名詞,代名詞,一般,*,*,*,あなた,アナタ,アナタ"),
    ("だけ", "助詞,副助詞,*,*,*,*,だけ,ダケ,ダケ"),
    (")", "記号,括弧閉,*,*,*,*,),),)"),
];

//! Morphological tokens produced by an external analyzer
//!
//! A [`FeatureToken`] carries the surface form, its character offset in the
//! analysed text and a closed set of IPADIC-style feature slots. Rules address
//! the slots through [`FieldName`], so the set of fields a rule can test is
//! fixed at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named string slot of a [`FeatureToken`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Surface form as it appears in the text
    SurfaceForm,
    /// Part of speech (品詞)
    Pos,
    /// Part of speech subdivision 1 (品詞細分類1)
    #[serde(rename = "pos_detail_1")]
    PosDetail1,
    /// Part of speech subdivision 2 (品詞細分類2)
    #[serde(rename = "pos_detail_2")]
    PosDetail2,
    /// Part of speech subdivision 3 (品詞細分類3)
    #[serde(rename = "pos_detail_3")]
    PosDetail3,
    /// Conjugation type (活用型)
    ConjugatedType,
    /// Conjugation form (活用形)
    ConjugatedForm,
    /// Dictionary form (原形)
    BasicForm,
    /// Reading (読み)
    Reading,
    /// Pronunciation (発音)
    Pronunciation,
    /// Analyzer word type, e.g. `KNOWN` or `UNKNOWN`
    WordType,
}

impl FieldName {
    /// Number of fields
    pub const COUNT: usize = 11;

    /// Every field in evaluation order
    pub const ALL: [FieldName; Self::COUNT] = [
        FieldName::SurfaceForm,
        FieldName::Pos,
        FieldName::PosDetail1,
        FieldName::PosDetail2,
        FieldName::PosDetail3,
        FieldName::ConjugatedType,
        FieldName::ConjugatedForm,
        FieldName::BasicForm,
        FieldName::Reading,
        FieldName::Pronunciation,
        FieldName::WordType,
    ];

    /// Dense index in `0..COUNT`
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Configuration key of the field
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::SurfaceForm => "surface_form",
            FieldName::Pos => "pos",
            FieldName::PosDetail1 => "pos_detail_1",
            FieldName::PosDetail2 => "pos_detail_2",
            FieldName::PosDetail3 => "pos_detail_3",
            FieldName::ConjugatedType => "conjugated_type",
            FieldName::ConjugatedForm => "conjugated_form",
            FieldName::BasicForm => "basic_form",
            FieldName::Reading => "reading",
            FieldName::Pronunciation => "pronunciation",
            FieldName::WordType => "word_type",
        }
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown token field '{s}'"))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One morphological unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToken {
    /// Surface form
    pub surface_form: String,
    /// 0-based character offset of the surface form in the analysed text
    pub word_position: usize,
    /// Part of speech
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// First part-of-speech subdivision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_detail_1: Option<String>,
    /// Second part-of-speech subdivision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_detail_2: Option<String>,
    /// Third part-of-speech subdivision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_detail_3: Option<String>,
    /// Conjugation type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conjugated_type: Option<String>,
    /// Conjugation form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conjugated_form: Option<String>,
    /// Dictionary form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_form: Option<String>,
    /// Reading in katakana
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    /// Pronunciation in katakana
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Dictionary origin of the token (known or unknown word)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
}

impl FeatureToken {
    /// Create a token with only a surface form
    pub fn new(surface_form: impl Into<String>, word_position: usize) -> Self {
        Self {
            surface_form: surface_form.into(),
            word_position,
            ..Default::default()
        }
    }

    /// Create a token from an IPADIC/MeCab feature string
    ///
    /// The string is the comma separated
    /// `pos,pos1,pos2,pos3,ctype,cform,base,reading,pron` list. Entries that
    /// are `*` or empty stay absent; missing trailing entries are allowed.
    pub fn from_ipadic(surface_form: impl Into<String>, word_position: usize, features: &str) -> Self {
        const SLOTS: [FieldName; 9] = [
            FieldName::Pos,
            FieldName::PosDetail1,
            FieldName::PosDetail2,
            FieldName::PosDetail3,
            FieldName::ConjugatedType,
            FieldName::ConjugatedForm,
            FieldName::BasicForm,
            FieldName::Reading,
            FieldName::Pronunciation,
        ];

        let mut token = Self::new(surface_form, word_position);
        for (name, value) in SLOTS.iter().zip(features.split(',')) {
            let value = value.trim();
            if value.is_empty() || value == "*" {
                continue;
            }
            if let Some(slot) = token.slot_mut(*name) {
                *slot = Some(value.to_string());
            }
        }
        token
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: FieldName, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.slot_mut(name) {
            Some(slot) => *slot = Some(value),
            None => self.surface_form = value,
        }
        self
    }

    /// Value of a field; empty strings count as absent
    pub fn field(&self, name: FieldName) -> Option<&str> {
        let value = match name {
            FieldName::SurfaceForm => Some(self.surface_form.as_str()),
            FieldName::Pos => self.pos.as_deref(),
            FieldName::PosDetail1 => self.pos_detail_1.as_deref(),
            FieldName::PosDetail2 => self.pos_detail_2.as_deref(),
            FieldName::PosDetail3 => self.pos_detail_3.as_deref(),
            FieldName::ConjugatedType => self.conjugated_type.as_deref(),
            FieldName::ConjugatedForm => self.conjugated_form.as_deref(),
            FieldName::BasicForm => self.basic_form.as_deref(),
            FieldName::Reading => self.reading.as_deref(),
            FieldName::Pronunciation => self.pronunciation.as_deref(),
            FieldName::WordType => self.word_type.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Optional slot behind a field; `None` for the surface form
    fn slot_mut(&mut self, name: FieldName) -> Option<&mut Option<String>> {
        let slot = match name {
            FieldName::SurfaceForm => return None,
            FieldName::Pos => &mut self.pos,
            FieldName::PosDetail1 => &mut self.pos_detail_1,
            FieldName::PosDetail2 => &mut self.pos_detail_2,
            FieldName::PosDetail3 => &mut self.pos_detail_3,
            FieldName::ConjugatedType => &mut self.conjugated_type,
            FieldName::ConjugatedForm => &mut self.conjugated_form,
            FieldName::BasicForm => &mut self.basic_form,
            FieldName::Reading => &mut self.reading,
            FieldName::Pronunciation => &mut self.pronunciation,
            FieldName::WordType => &mut self.word_type,
        };
        Some(slot)
    }

    /// Surface length in characters
    #[inline]
    pub fn char_len(&self) -> usize {
        self.surface_form.chars().count()
    }

    /// Character offset just past the surface form
    #[inline]
    pub fn end_position(&self) -> usize {
        self.word_position + self.char_len()
    }

    /// True when the surface form is one or more whitespace characters
    pub fn is_whitespace(&self) -> bool {
        !self.surface_form.is_empty() && self.surface_form.chars().all(char::is_whitespace)
    }
}

//! Fixed layout of the feature vector.
//!
//! Callers index the vector by offset, so the constants in [`offsets`] and the
//! order of [`FEATURE_NAMES`] are a public contract and must never change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, Range};

/// Number of fields in a feature vector.
pub const FEATURE_COUNT: usize = 23;

/// Field offsets into [`FeatureVector`].
pub mod offsets {
    use std::ops::Range;

    pub const Q1_LENGTH: usize = 0;
    pub const Q2_LENGTH: usize = 1;
    pub const Q1_WORD_COUNT: usize = 2;
    pub const Q2_WORD_COUNT: usize = 3;
    pub const COMMON_WORDS: usize = 4;
    pub const TOTAL_WORDS: usize = 5;
    pub const COMMON_TOTAL_RATIO: usize = 6;

    pub const WORD_RATIO_MIN: usize = 7;
    pub const WORD_RATIO_MAX: usize = 8;
    pub const STOP_RATIO_MIN: usize = 9;
    pub const STOP_RATIO_MAX: usize = 10;
    pub const TOKEN_RATIO_MIN: usize = 11;
    pub const TOKEN_RATIO_MAX: usize = 12;
    pub const LAST_WORD_MATCH: usize = 13;
    pub const FIRST_WORD_MATCH: usize = 14;

    pub const ABS_LENGTH_DIFF: usize = 15;
    pub const MEAN_LENGTH: usize = 16;
    pub const LONGEST_SUBSTRING_RATIO: usize = 17;

    pub const FUZZ_RATIO: usize = 18;
    pub const FUZZ_PARTIAL_RATIO: usize = 19;
    pub const TOKEN_SORT_RATIO: usize = 20;
    pub const TOKEN_SET_RATIO: usize = 21;

    pub const COSINE_SIMILARITY: usize = 22;

    pub const BASIC: Range<usize> = 0..7;
    pub const TOKEN: Range<usize> = 7..15;
    pub const LENGTH: Range<usize> = 15..18;
    pub const FUZZY: Range<usize> = 18..22;
}

/// Display names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Q1 Length",
    "Q2 Length",
    "Q1 Word Count",
    "Q2 Word Count",
    "Common Words",
    "Total Words",
    "Common/Total Ratio",
    "Common Word Ratio",
    "Word Ratio Max",
    "Stop Word Ratio",
    "Stop Word Ratio Max",
    "Token Ratio",
    "Token Ratio Max",
    "Last Word Match",
    "First Word Match",
    "Absolute Length Diff",
    "Average Token Length",
    "Longest Common Substring Ratio",
    "Fuzz Ratio",
    "Partial Ratio",
    "Token Sort Ratio",
    "Token Set Ratio",
    "Cosine Similarity",
];

/// Feature group, used for grouped display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    Basic,
    Token,
    Length,
    Fuzzy,
    Cosine,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 5] = [
        Self::Basic,
        Self::Token,
        Self::Length,
        Self::Fuzzy,
        Self::Cosine,
    ];

    pub fn range(self) -> Range<usize> {
        match self {
            Self::Basic => offsets::BASIC,
            Self::Token => offsets::TOKEN,
            Self::Length => offsets::LENGTH,
            Self::Fuzzy => offsets::FUZZY,
            Self::Cosine => offsets::COSINE_SIMILARITY..FEATURE_COUNT,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic Features",
            Self::Token => "Token Features",
            Self::Length => "Length Features",
            Self::Fuzzy => "Fuzzy Features",
            Self::Cosine => "Cosine Similarity",
        }
    }
}

/// The 23-field output of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub(crate) fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, offset: usize) -> Option<f64> {
        self.0.get(offset).copied()
    }

    /// Values of one feature group.
    pub fn group(&self, group: FeatureGroup) -> &[f64] {
        &self.0[group.range()]
    }

    pub fn cosine_similarity(&self) -> f64 {
        self.0[offsets::COSINE_SIMILARITY]
    }

    /// Name → value map in vector order.
    pub fn named(&self) -> IndexMap<&'static str, f64> {
        FEATURE_NAMES.iter().copied().zip(self.0).collect()
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, offset: usize) -> &f64 {
        &self.0[offset]
    }
}

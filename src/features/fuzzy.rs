//! Approximate string matching scores on a 0–100 scale.
//!
//! All four scores are built on one primitive: the indel similarity
//! `2·LCS / (|a| + |b|)`, where LCS is the longest common character
//! subsequence. That is the edit-distance ratio with substitutions costing
//! one deletion plus one insertion.
//!
//! LCS lengths are computed bit-parallel (64 pattern characters per word),
//! so long questions stay cheap.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::text::NormalizedQuestion;

/// Windows scoring at or above this are treated as a perfect partial match.
const PARTIAL_PERFECT: f64 = 0.995;

/// The four fuzzy scores for a question pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyScores {
    pub ratio: u8,
    pub partial_ratio: u8,
    pub token_sort_ratio: u8,
    pub token_set_ratio: u8,
}

impl FuzzyScores {
    pub fn compute(a: &NormalizedQuestion, b: &NormalizedQuestion) -> Self {
        Self {
            ratio: ratio(a.text(), b.text()),
            partial_ratio: partial_ratio(a.text(), b.text()),
            token_sort_ratio: token_sort_ratio(a.tokens(), b.tokens()),
            token_set_ratio: token_set_ratio(a.tokens(), b.tokens()),
        }
    }

    /// Scores in vector order.
    pub fn to_features(self) -> [f64; 4] {
        [
            f64::from(self.ratio),
            f64::from(self.partial_ratio),
            f64::from(self.token_sort_ratio),
            f64::from(self.token_set_ratio),
        ]
    }
}

/// Whole-string similarity.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_percent(similarity(&a, &b))
}

/// Best similarity of the shorter string against every equally long window
/// of the longer one.
///
/// A window is only scored when its character counts leave room to beat the
/// best LCS found so far, which skips most windows of unrelated text.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return 0;
    }

    let width = shorter.len();
    let masks = PatternMasks::new(&shorter);
    let mut needed: HashMap<char, usize> = HashMap::new();
    for &c in &shorter {
        *needed.entry(c).or_default() += 1;
    }

    let mut held: HashMap<char, usize> = HashMap::new();
    // Multiset intersection of the window with `shorter`, an upper bound on LCS
    let mut matchable = 0usize;
    let mut best = 0usize;

    for (end, &incoming) in longer.iter().enumerate() {
        if let Some(&need) = needed.get(&incoming) {
            let count = held.entry(incoming).or_default();
            if *count < need {
                matchable += 1;
            }
            *count += 1;
        }
        if end >= width {
            let outgoing = longer[end - width];
            if let (Some(&need), Some(count)) = (needed.get(&outgoing), held.get_mut(&outgoing)) {
                *count -= 1;
                if *count < need {
                    matchable -= 1;
                }
            }
        }
        if end + 1 < width || matchable <= best {
            continue;
        }

        best = best.max(masks.lcs(&longer[end + 1 - width..=end]));
        if best as f64 / width as f64 >= PARTIAL_PERFECT {
            return 100;
        }
    }
    to_percent(best as f64 / width as f64)
}

/// Similarity after sorting each side's tokens alphabetically.
pub fn token_sort_ratio<S: AsRef<str>>(a: &[S], b: &[S]) -> u8 {
    ratio(&sorted_join(a), &sorted_join(b))
}

/// Similarity built from the shared tokens and each side's remainder.
pub fn token_set_ratio<S: AsRef<str>>(a: &[S], b: &[S]) -> u8 {
    let set_a: BTreeSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: BTreeSet<&str> = b.iter().map(AsRef::as_ref).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0;
    }

    let sect = join(set_a.intersection(&set_b));
    let diff_ab = join(set_a.difference(&set_b));
    let diff_ba = join(set_b.difference(&set_a));

    let combined_ab = format!("{sect} {diff_ab}").trim().to_string();
    let combined_ba = format!("{sect} {diff_ba}").trim().to_string();

    [
        ratio(&sect, &combined_ab),
        ratio(&sect, &combined_ba),
        ratio(&combined_ab, &combined_ba),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn join<S: AsRef<str>>(tokens: impl Iterator<Item = S>) -> String {
    tokens
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn sorted_join<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.join(" ")
}

fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Indel similarity in [0, 1]. Zero when either side is empty.
fn similarity(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lcs = lcs_length(a, b);
    (2 * lcs) as f64 / (a.len() + b.len()) as f64
}

/// Longest common subsequence length.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    PatternMasks::new(pattern).lcs(text)
}

/// Match masks of a pattern, one bit per pattern position, for the
/// bit-parallel LCS recurrence `V = (V + (V & M)) | (V & !M)`.
struct PatternMasks {
    len: usize,
    masks: HashMap<char, Vec<u64>>,
}

impl PatternMasks {
    fn new(pattern: &[char]) -> Self {
        let words = pattern.len().div_ceil(64);
        let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1 << (i % 64);
        }
        Self {
            len: pattern.len(),
            masks,
        }
    }

    /// LCS length of the pattern against `text`.
    fn lcs(&self, text: &[char]) -> usize {
        let mut state = vec![u64::MAX; self.len.div_ceil(64)];
        for c in text {
            let Some(mask) = self.masks.get(c) else {
                continue;
            };
            let mut carry = false;
            for (word, &m) in state.iter_mut().zip(mask) {
                let (sum, overflow_a) = word.overflowing_add(*word & m);
                let (sum, overflow_b) = sum.overflowing_add(u64::from(carry));
                carry = overflow_a || overflow_b;
                *word = sum | (*word & !m);
            }
        }

        // Cleared bits below `len` are matched pattern positions
        state
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let live = (self.len - i * 64).min(64);
                let valid = if live == 64 { u64::MAX } else { (1u64 << live) - 1 };
                (!word & valid).count_ones() as usize
            })
            .sum()
    }
}

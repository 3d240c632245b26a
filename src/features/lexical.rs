//! Lexical features: lengths, word overlap, stopword overlap and length stats.

use std::collections::HashSet;

use super::SAFE_DIV;
use super::lcs::longest_common_run_ratio;
use crate::text::{NormalizedQuestion, StopWords};

fn token_set(q: &NormalizedQuestion) -> HashSet<&str> {
    q.tokens().iter().map(String::as_str).collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    (numerator as f64 / (denominator as f64 + SAFE_DIV)).clamp(0.0, 1.0)
}

/// Number of distinct tokens shared by both questions.
pub fn common_word_count(a: &NormalizedQuestion, b: &NormalizedQuestion) -> usize {
    token_set(a).intersection(&token_set(b)).count()
}

/// Basic features, in vector order:
/// q1 length, q2 length, q1 words, q2 words, common words, total words, common/total.
pub fn basic_features(a: &NormalizedQuestion, b: &NormalizedQuestion) -> [f64; 7] {
    let common = common_word_count(a, b);
    let total = a.token_count() + b.token_count();

    [
        a.char_len() as f64,
        b.char_len() as f64,
        a.token_count() as f64,
        b.token_count() as f64,
        common as f64,
        total as f64,
        ratio(common, total),
    ]
}

/// Token features, in vector order:
/// content-word overlap (min, max), stopword overlap (min, max),
/// token overlap (min, max), last token match, first token match.
pub fn token_features(
    a: &NormalizedQuestion,
    b: &NormalizedQuestion,
    stopwords: &StopWords,
) -> [f64; 8] {
    let mut features = [0.0; 8];
    features[6] = edge_match(a.tokens().last(), b.tokens().last());
    features[7] = edge_match(a.tokens().first(), b.tokens().first());

    if a.is_empty() || b.is_empty() {
        return features;
    }

    let (words_a, stops_a): (HashSet<&str>, HashSet<&str>) =
        token_set(a).into_iter().partition(|t| !stopwords.contains(t));
    let (words_b, stops_b): (HashSet<&str>, HashSet<&str>) =
        token_set(b).into_iter().partition(|t| !stopwords.contains(t));

    let common_words = words_a.intersection(&words_b).count();
    let common_stops = stops_a.intersection(&stops_b).count();
    let common_tokens = common_word_count(a, b);

    features[0] = ratio(common_words, words_a.len().min(words_b.len()));
    features[1] = ratio(common_words, words_a.len().max(words_b.len()));
    features[2] = ratio(common_stops, stops_a.len().min(stops_b.len()));
    features[3] = ratio(common_stops, stops_a.len().max(stops_b.len()));
    features[4] = ratio(common_tokens, a.token_count().min(b.token_count()));
    features[5] = ratio(common_tokens, a.token_count().max(b.token_count()));

    features
}

/// 1.0 when both edge tokens are equal. Two empty questions count as a match.
fn edge_match(a: Option<&String>, b: Option<&String>) -> f64 {
    if a == b { 1.0 } else { 0.0 }
}

/// Length features, in vector order:
/// absolute token count difference, mean token count, longest common run ratio.
pub fn length_features(a: &NormalizedQuestion, b: &NormalizedQuestion) -> [f64; 3] {
    let (len_a, len_b) = (a.token_count(), b.token_count());
    [
        len_a.abs_diff(len_b) as f64,
        (len_a + len_b) as f64 / 2.0,
        longest_common_run_ratio(a.tokens(), b.tokens()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> NormalizedQuestion {
        NormalizedQuestion::from_normalized(text)
    }

    #[test]
    fn test_basic_features_counts() {
        let f = basic_features(&q("how to learn python"), &q("how to learn rust fast"));
        assert_eq!(f[0], 19.0);
        assert_eq!(f[1], 22.0);
        assert_eq!(f[2], 4.0);
        assert_eq!(f[3], 5.0);
        assert_eq!(f[4], 3.0);
        assert_eq!(f[5], 9.0);
        assert!((f[6] - 3.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_common_words_collapse_duplicates() {
        assert_eq!(common_word_count(&q("the the the cat"), &q("the cat cat")), 2);
    }

    #[test]
    fn test_token_features_identical() {
        let a = q("what is the capital of france");
        let f = token_features(&a, &a, &StopWords::english());
        for value in &f[..6] {
            assert!((value - 1.0).abs() < 1e-3, "expected ~1.0, got {value}");
        }
        assert_eq!(f[6], 1.0);
        assert_eq!(f[7], 1.0);
    }

    #[test]
    fn test_token_features_split_stopwords() {
        let a = q("what is the best language");
        let b = q("which is the fastest language");
        let f = token_features(&a, &b, &StopWords::english());
        // content words: {best, language} vs {fastest, language}
        assert!((f[0] - 0.5).abs() < 1e-3);
        assert!((f[1] - 0.5).abs() < 1e-3);
        // stopwords: {what, is, the} vs {which, is, the}
        assert!((f[2] - 2.0 / 3.0).abs() < 1e-3);
        assert_eq!(f[6], 1.0);
        assert_eq!(f[7], 0.0);
    }

    #[test]
    fn test_token_features_empty_guard() {
        let stops = StopWords::english();
        let f = token_features(&q(""), &q("hello"), &stops);
        assert_eq!(f, [0.0; 8]);

        let both_empty = token_features(&q(""), &q(""), &stops);
        assert_eq!(&both_empty[..6], &[0.0; 6]);
        assert_eq!(both_empty[6], 1.0);
        assert_eq!(both_empty[7], 1.0);
    }

    #[test]
    fn test_length_features() {
        let f = length_features(&q("a b c d"), &q("b c"));
        assert_eq!(f[0], 2.0);
        assert_eq!(f[1], 3.0);
        assert!((f[2] - 2.0 / 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_all_empty_is_finite() {
        let basic = basic_features(&q(""), &q(""));
        let length = length_features(&q(""), &q(""));
        assert!(basic.iter().chain(length.iter()).all(|v| v.is_finite()));
        assert_eq!(basic[6], 0.0);
    }
}

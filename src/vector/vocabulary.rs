//! Frozen token → column mapping for bag-of-words embeddings.

use std::collections::HashMap;

use crate::pipeline::{PipelineError, PipelineResult};

/// Immutable vocabulary of dimension `D`.
///
/// Columns are dense (`0..D`) and every column belongs to exactly one token.
/// Construction is the only place the mapping can change; share it across
/// threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Build from an explicit token → column map, as produced by an offline
    /// fitting step.
    pub fn from_index_map(index: HashMap<String, usize>) -> PipelineResult<Self> {
        if index.is_empty() {
            return Err(invalid("vocabulary is empty"));
        }

        let dimension = index.len();
        let mut slots: Vec<Option<String>> = vec![None; dimension];

        for (token, &column) in &index {
            if token.is_empty() {
                return Err(invalid("empty token"));
            }
            let slot = slots.get_mut(column).ok_or_else(|| {
                invalid(format!(
                    "column {column} for '{token}' is outside 0..{dimension}"
                ))
            })?;
            if let Some(existing) = slot {
                return Err(invalid(format!(
                    "tokens '{existing}' and '{token}' share column {column}"
                )));
            }
            *slot = Some(token.clone());
        }

        // Every slot is filled: `dimension` distinct in-range columns for `dimension` tokens.
        let tokens = slots.into_iter().flatten().collect();
        Ok(Self { index, tokens })
    }

    /// Build from tokens in column order.
    pub fn from_tokens<I, S>(tokens: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        for token in tokens {
            let token = token.into();
            let column = index.len();
            if let Some(previous) = index.insert(token.clone(), column) {
                return Err(invalid(format!(
                    "duplicate token '{token}' at columns {previous} and {column}"
                )));
            }
        }
        Self::from_index_map(index)
    }

    /// Column of `token`, if it is in the vocabulary.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Token stored at `column`.
    pub fn token(&self, column: usize) -> Option<&str> {
        self.tokens.get(column).map(String::as_str)
    }

    /// Vocabulary size `D`.
    pub fn dimension(&self) -> usize {
        self.tokens.len()
    }
}

fn invalid(reason: impl Into<String>) -> PipelineError {
    PipelineError::InvalidVocabulary {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens_assigns_columns_in_order() {
        let vocab = Vocabulary::from_tokens(["capital", "france", "python"]).unwrap();
        assert_eq!(vocab.dimension(), 3);
        assert_eq!(vocab.index_of("france"), Some(1));
        assert_eq!(vocab.token(2), Some("python"));
        assert!(!vocab.contains("pasta"));
    }

    #[test]
    fn test_from_index_map_roundtrip() {
        let map = HashMap::from([("b".to_string(), 1), ("a".to_string(), 0)]);
        let vocab = Vocabulary::from_index_map(map).unwrap();
        assert_eq!(vocab.token(0), Some("a"));
        assert_eq!(vocab.token(1), Some("b"));
    }

    #[test]
    fn test_rejects_empty() {
        let result = Vocabulary::from_tokens(Vec::<String>::new());
        assert!(matches!(result, Err(PipelineError::InvalidVocabulary { .. })));
    }

    #[test]
    fn test_rejects_collisions_and_gaps() {
        let collision = HashMap::from([("a".to_string(), 0), ("b".to_string(), 0)]);
        assert!(Vocabulary::from_index_map(collision).is_err());

        let gap = HashMap::from([("a".to_string(), 0), ("b".to_string(), 5)]);
        assert!(Vocabulary::from_index_map(gap).is_err());

        assert!(Vocabulary::from_tokens(["a", "b", "a"]).is_err());
    }
}

//! Bag-of-words embedder.

use std::sync::Arc;

use super::Vocabulary;
use crate::text::NormalizedQuestion;

/// Maps a question to per-token occurrence counts over a frozen vocabulary.
#[derive(Debug, Clone)]
pub struct BagOfWordsEmbedder {
    vocabulary: Arc<Vocabulary>,
}

impl BagOfWordsEmbedder {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.dimension()
    }

    /// Dense count vector of length `D`. Out-of-vocabulary tokens are ignored.
    pub fn embed(&self, question: &NormalizedQuestion) -> Vec<f64> {
        let mut counts = vec![0.0; self.dimensions()];
        for column in question
            .tokens()
            .iter()
            .filter_map(|token| self.vocabulary.index_of(token))
        {
            counts[column] += 1.0;
        }
        counts
    }

    /// Number of tokens in `question` the vocabulary knows about.
    pub fn coverage(&self, question: &NormalizedQuestion) -> usize {
        question
            .tokens()
            .iter()
            .filter(|token| self.vocabulary.contains(token))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedder() -> BagOfWordsEmbedder {
        let vocab = Vocabulary::from_tokens(["what", "capital", "france", "learn"]).unwrap();
        BagOfWordsEmbedder::new(Arc::new(vocab))
    }

    #[test]
    fn test_counts_occurrences() {
        let q = NormalizedQuestion::from_normalized("what what is the capital of france");
        assert_eq!(embedder().embed(&q), vec![2.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_out_of_vocabulary_ignored() {
        let q = NormalizedQuestion::from_normalized("cook pasta tonight");
        let e = embedder();
        assert_eq!(e.embed(&q), vec![0.0; 4]);
        assert_eq!(e.coverage(&q), 0);
    }

    #[test]
    fn test_empty_question() {
        let q = NormalizedQuestion::from_normalized("");
        assert_eq!(embedder().embed(&q).len(), 4);
    }
}

//! Parallel scoring of many question pairs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PipelineResult, QuestionPipeline};
use crate::features::FeatureVector;
use crate::types::SimilarityResult;

/// One raw question pair, as read from JSON lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPair {
    #[serde(alias = "q1", alias = "question1")]
    pub question_a: String,

    #[serde(alias = "q2", alias = "question2")]
    pub question_b: String,
}

impl QuestionPair {
    pub fn new(question_a: impl Into<String>, question_b: impl Into<String>) -> Self {
        Self {
            question_a: question_a.into(),
            question_b: question_b.into(),
        }
    }
}

/// Per-pair batch output.
#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    /// Position of the pair in the input
    pub index: usize,

    #[serde(flatten)]
    pub result: Option<SimilarityResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuestionPipeline {
    /// Compute feature vectors for many pairs in parallel.
    ///
    /// Output order matches input order. A failing pair only fails its own slot.
    pub fn compute_batch(&self, pairs: &[QuestionPair]) -> Vec<PipelineResult<FeatureVector>> {
        pairs
            .par_iter()
            .map(|pair| self.compute_features(&pair.question_a, &pair.question_b))
            .collect()
    }

    /// Score and judge many pairs in parallel.
    ///
    /// The threshold is validated once up front; per-pair failures are
    /// reported in [`PairOutcome::error`].
    pub fn compare_batch(
        &self,
        pairs: &[QuestionPair],
        threshold: f64,
        include_features: bool,
    ) -> PipelineResult<Vec<PairOutcome>> {
        crate::types::validate_threshold(threshold)?;

        let outcomes: Vec<PairOutcome> = self
            .compute_batch(pairs)
            .into_iter()
            .enumerate()
            .map(|(index, computed)| match computed {
                Ok(features) => PairOutcome {
                    index,
                    result: SimilarityResult::from_features(&features, threshold).ok(),
                    features: include_features.then_some(features),
                    error: None,
                },
                Err(e) => PairOutcome {
                    index,
                    result: None,
                    features: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        tracing::info!(
            target: "batch",
            "Scored {} pairs ({} failed)",
            outcomes.len(),
            failed
        );

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vocabulary;

    fn pipeline() -> QuestionPipeline {
        let vocab = Vocabulary::from_tokens(["learn", "rust", "python", "cook", "pasta"]).unwrap();
        QuestionPipeline::builder().vocabulary(vocab).build().unwrap()
    }

    #[test]
    fn test_batch_preserves_order_and_matches_single() {
        let p = pipeline();
        let pairs = vec![
            QuestionPair::new("learn rust", "learn rust"),
            QuestionPair::new("learn python", "cook pasta"),
            QuestionPair::new("", "cook pasta"),
        ];

        let results = p.compute_batch(&pairs);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &p.compute_features("learn rust", "learn rust").unwrap()
        );
        assert_eq!(results[1].as_ref().unwrap().cosine_similarity(), 0.0);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_compare_batch_reports_errors_per_pair() {
        let pairs = vec![
            QuestionPair::new("learn rust", "learn rust"),
            QuestionPair::new("   ", "learn rust"),
        ];
        let outcomes = pipeline().compare_batch(&pairs, 0.85, false).unwrap();

        assert!(outcomes[0].result.unwrap().is_duplicate);
        assert!(outcomes[0].features.is_none());
        assert_eq!(outcomes[1].index, 1);
        assert!(outcomes[1].error.as_ref().unwrap().contains("first question"));
    }

    #[test]
    fn test_pair_accepts_short_field_names() {
        let pair: QuestionPair = serde_json::from_str(r#"{"q1": "a", "q2": "b"}"#).unwrap();
        assert_eq!(pair, QuestionPair::new("a", "b"));
    }
}

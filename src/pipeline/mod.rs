//! Question pair feature pipeline
//!
//! Turns two raw questions into one [`FeatureVector`].
//!
//! ## Architecture
//!
//! ```text
//!              ┌─► LEXICAL (basic, token, length) ─┐
//! NORMALIZE ───┼─► FUZZY ──────────────────────────┼─► ASSEMBLE
//!              └─► EMBED (per question) ─► COSINE ─┘
//! ```
//!
//! Every stage is a pure function. The only shared state is the frozen
//! vocabulary held behind an `Arc`, so one pipeline can serve any number of
//! threads without locking.
//!
//! ## Usage
//!
//! ```ignore
//! use qsim::pipeline::QuestionPipeline;
//!
//! let pipeline = QuestionPipeline::builder().vocabulary(vocab).build()?;
//! let features = pipeline.compute_features("How do I learn Rust?", "Best way to learn Rust?")?;
//! let score = features.cosine_similarity();
//! ```

mod batch;
mod error;

pub use batch::{PairOutcome, QuestionPair};
pub use error::{PipelineError, PipelineResult, QuestionSide};

use std::sync::Arc;

use crate::Settings;
use crate::features::{FEATURE_COUNT, FeatureVector, FuzzyScores, lexical, offsets};
use crate::text::{NormalizedQuestion, Normalizer, NormalizerTables, StopWords};
use crate::types::SimilarityResult;
use crate::vector::{BagOfWordsEmbedder, Vocabulary, cosine_similarity};

/// Orchestrates normalization, feature extraction and scoring for question pairs.
#[derive(Debug, Clone)]
pub struct QuestionPipeline {
    normalizer: Normalizer,
    stopwords: StopWords,
    embedder: BagOfWordsEmbedder,
}

impl QuestionPipeline {
    /// Start building a pipeline.
    pub fn builder() -> QuestionPipelineBuilder {
        QuestionPipelineBuilder::default()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.embedder.vocabulary()
    }

    /// Normalize one raw question.
    pub fn normalize(&self, raw: &str) -> NormalizedQuestion {
        self.normalizer.normalize(raw)
    }

    /// Tokens of `question` that contribute to its embedding.
    pub fn coverage(&self, question: &NormalizedQuestion) -> usize {
        self.embedder.coverage(question)
    }

    /// Compute the full feature vector for a raw question pair.
    ///
    /// Fails with [`PipelineError::InvalidInput`] when either question is
    /// blank. Questions that become empty only after normalization (all
    /// punctuation) are accepted and produce zeroed ratio features.
    pub fn compute_features(&self, question_a: &str, question_b: &str) -> PipelineResult<FeatureVector> {
        if question_a.trim().is_empty() {
            return Err(PipelineError::InvalidInput {
                which: QuestionSide::First,
            });
        }
        if question_b.trim().is_empty() {
            return Err(PipelineError::InvalidInput {
                which: QuestionSide::Second,
            });
        }

        let a = self.normalizer.normalize(question_a);
        let b = self.normalizer.normalize(question_b);
        Ok(self.features_for(&a, &b))
    }

    /// Assemble features for two already-normalized questions.
    ///
    /// Never fails: empty questions produce finite, zeroed ratios.
    pub fn features_for(&self, a: &NormalizedQuestion, b: &NormalizedQuestion) -> FeatureVector {
        let basic = lexical::basic_features(a, b);
        let token = lexical::token_features(a, b, &self.stopwords);
        let length = lexical::length_features(a, b);
        let fuzzy = FuzzyScores::compute(a, b).to_features();
        let cosine = cosine_similarity(&self.embedder.embed(a), &self.embedder.embed(b));

        let mut values = [0.0; FEATURE_COUNT];
        values[offsets::BASIC].copy_from_slice(&basic);
        values[offsets::TOKEN].copy_from_slice(&token);
        values[offsets::LENGTH].copy_from_slice(&length);
        values[offsets::FUZZY].copy_from_slice(&fuzzy);
        values[offsets::COSINE_SIMILARITY] = cosine;

        FeatureVector::from_array(values)
    }

    /// Cosine similarity of the pair (field 22 of the feature vector).
    pub fn score(&self, question_a: &str, question_b: &str) -> PipelineResult<f64> {
        self.compute_features(question_a, question_b)
            .map(|features| features.cosine_similarity())
    }

    /// Score the pair and decide whether it is a duplicate.
    pub fn compare(
        &self,
        question_a: &str,
        question_b: &str,
        threshold: f64,
    ) -> PipelineResult<SimilarityResult> {
        crate::types::validate_threshold(threshold)?;
        let features = self.compute_features(question_a, question_b)?;
        SimilarityResult::from_features(&features, threshold)
    }
}

/// Builder for [`QuestionPipeline`].
///
/// The vocabulary is mandatory; tables default to the built-in English set.
#[derive(Debug, Default)]
pub struct QuestionPipelineBuilder {
    vocabulary: Option<Arc<Vocabulary>>,
    tables: Option<NormalizerTables>,
    stopwords: Option<StopWords>,
}

impl QuestionPipelineBuilder {
    pub fn vocabulary(mut self, vocabulary: impl Into<Arc<Vocabulary>>) -> Self {
        self.vocabulary = Some(vocabulary.into());
        self
    }

    pub fn tables(mut self, tables: NormalizerTables) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn stopwords(mut self, stopwords: StopWords) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Apply the normalizer section of settings.
    pub fn settings(self, settings: &Settings) -> Self {
        self.tables(settings.normalizer.tables())
            .stopwords(settings.normalizer.stopwords())
    }

    pub fn build(self) -> PipelineResult<QuestionPipeline> {
        let vocabulary = self.vocabulary.ok_or(PipelineError::VocabularyUnavailable)?;

        tracing::debug!(
            target: "pipeline",
            "Pipeline ready: {} vocabulary columns",
            vocabulary.dimension()
        );

        Ok(QuestionPipeline {
            normalizer: Normalizer::new(self.tables.unwrap_or_default()),
            stopwords: self.stopwords.unwrap_or_default(),
            embedder: BagOfWordsEmbedder::new(vocabulary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureGroup;

    fn pipeline() -> QuestionPipeline {
        let vocab = Vocabulary::from_tokens([
            "what", "is", "the", "capital", "of", "france", "how", "to", "learn", "python",
            "best", "way", "cook", "pasta",
        ])
        .unwrap();
        QuestionPipeline::builder().vocabulary(vocab).build().unwrap()
    }

    #[test]
    fn test_build_without_vocabulary_fails() {
        let result = QuestionPipeline::builder().build();
        assert!(matches!(result, Err(PipelineError::VocabularyUnavailable)));
    }

    #[test]
    fn test_builder_settings_adjust_stopwords() {
        let vocab = Vocabulary::from_tokens(["rust"]).unwrap();
        let mut settings = Settings::default();
        settings.normalizer.extra_stopwords = vec!["quora".to_string()];
        settings.normalizer.keep_stopwords = vec!["not".to_string()];

        let configured = QuestionPipeline::builder()
            .settings(&settings)
            .vocabulary(vocab.clone())
            .build()
            .unwrap();
        let plain = QuestionPipeline::builder().vocabulary(vocab).build().unwrap();

        let added = "quora rust";
        assert_eq!(plain.compute_features(added, added).unwrap()[offsets::STOP_RATIO_MIN], 0.0);
        assert!(configured.compute_features(added, added).unwrap()[offsets::STOP_RATIO_MIN] > 0.99);

        let kept = "not rust";
        assert!(plain.compute_features(kept, kept).unwrap()[offsets::STOP_RATIO_MIN] > 0.99);
        assert_eq!(configured.compute_features(kept, kept).unwrap()[offsets::STOP_RATIO_MIN], 0.0);
    }

    #[test]
    fn test_builder_settings_apply_symbol_table() {
        let vocab = Vocabulary::from_tokens(["plus"]).unwrap();
        let mut settings = Settings::default();
        settings.normalizer.symbols.insert("+".to_string(), " plus ".to_string());

        let pipeline = QuestionPipeline::builder()
            .vocabulary(vocab)
            .settings(&settings)
            .build()
            .unwrap();
        assert_eq!(pipeline.normalize("c+").text(), "c plus");
    }

    #[test]
    fn test_near_identical_questions() {
        let f = pipeline()
            .compute_features("What is the capital of France?", "What is the capital of France")
            .unwrap();
        assert!((f.cosine_similarity() - 1.0).abs() < 1e-9);
        assert_eq!(f[offsets::LAST_WORD_MATCH], 1.0);
        assert_eq!(f[offsets::FIRST_WORD_MATCH], 1.0);
        assert_eq!(f[offsets::ABS_LENGTH_DIFF], 0.0);
        assert_eq!(f[offsets::FUZZ_RATIO], 100.0);
    }

    #[test]
    fn test_unrelated_questions() {
        let f = pipeline()
            .compute_features("How to learn Python?", "What is the best way to cook pasta?")
            .unwrap();
        assert!(f.cosine_similarity() < 0.3, "got {}", f.cosine_similarity());
        assert!(f[offsets::COMMON_TOTAL_RATIO] < 0.1);
    }

    #[test]
    fn test_blank_input_rejected() {
        let p = pipeline();
        assert!(matches!(
            p.compute_features("", "Hello"),
            Err(PipelineError::InvalidInput { which: QuestionSide::First })
        ));
        assert!(matches!(
            p.compute_features("Hello", "   "),
            Err(PipelineError::InvalidInput { which: QuestionSide::Second })
        ));
    }

    #[test]
    fn test_punctuation_only_is_degenerate_but_finite() {
        let f = pipeline().compute_features("???", "What is the capital?").unwrap();
        assert!(f.is_finite());
        assert_eq!(f.cosine_similarity(), 0.0);
        assert!(f.group(FeatureGroup::Token)[..6].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_out_of_vocabulary_identity_scores_zero() {
        // No token is in the vocabulary, so both embeddings have zero norm
        let score = pipeline().score("zebra xylophone", "zebra xylophone").unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_compare_applies_threshold() {
        let p = pipeline();
        let result = p
            .compare("What is the capital of France?", "capital of France?", 0.5)
            .unwrap();
        assert!(result.is_duplicate);
        assert!(p.compare("a", "b", 2.0).is_err());
    }
}

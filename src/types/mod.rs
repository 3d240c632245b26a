use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::pipeline::{PipelineError, PipelineResult};

/// Outcome of comparing one question pair against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Cosine similarity in [0, 1]
    pub cosine_sim: f64,

    /// True when `cosine_sim` is strictly above the threshold
    pub is_duplicate: bool,
}

impl SimilarityResult {
    /// Derive the verdict from a feature vector.
    pub fn from_features(features: &FeatureVector, threshold: f64) -> PipelineResult<Self> {
        let threshold = validate_threshold(threshold)?;
        let cosine_sim = features.cosine_similarity();
        Ok(Self {
            cosine_sim,
            is_duplicate: cosine_sim > threshold,
        })
    }
}

/// Reject thresholds outside [0, 1], including NaN.
pub fn validate_threshold(threshold: f64) -> PipelineResult<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(PipelineError::InvalidThreshold(threshold))
    }
}

/// Coarse similarity band, used for colouring CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityBand {
    Low,
    Medium,
    High,
}

impl SimilarityBand {
    pub fn of(score: f64) -> Self {
        if score < 0.3 {
            Self::Low
        } else if score < 0.7 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FEATURE_COUNT, offsets};

    fn vector_with_cosine(cosine: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[offsets::COSINE_SIMILARITY] = cosine;
        FeatureVector::from_array(values)
    }

    #[test]
    fn test_threshold_is_strict() {
        let at = SimilarityResult::from_features(&vector_with_cosine(0.85), 0.85).unwrap();
        assert!(!at.is_duplicate);

        let above = SimilarityResult::from_features(&vector_with_cosine(0.86), 0.85).unwrap();
        assert!(above.is_duplicate);
        assert_eq!(above.cosine_sim, 0.86);
    }

    #[test]
    fn test_invalid_thresholds() {
        let v = vector_with_cosine(0.5);
        assert!(SimilarityResult::from_features(&v, 1.5).is_err());
        assert!(SimilarityResult::from_features(&v, -0.1).is_err());
        assert!(SimilarityResult::from_features(&v, f64::NAN).is_err());
    }

    #[test]
    fn test_similarity_band() {
        assert_eq!(SimilarityBand::of(0.1), SimilarityBand::Low);
        assert_eq!(SimilarityBand::of(0.5), SimilarityBand::Medium);
        assert_eq!(SimilarityBand::of(0.95), SimilarityBand::High);
    }
}

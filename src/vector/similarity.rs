//! Cosine similarity between embeddings.

/// Norms below this are treated as zero.
const NORM_EPSILON: f64 = 1e-12;

/// Calculate cosine similarity between two vectors, clamped into [0, 1].
///
/// A zero-norm vector on either side yields 0 instead of NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "embedding dimensions differ");

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a < NORM_EPSILON || magnitude_b < NORM_EPSILON {
        return 0.0;
    }

    (dot_product / (magnitude_a * magnitude_b)).clamp(0.0, 1.0)
}

//! Vector-space representation of questions.
//!
//! A frozen [`Vocabulary`] maps tokens to columns, [`BagOfWordsEmbedder`]
//! turns each question into a count vector, and [`cosine_similarity`]
//! compares two of them.

mod embedder;
pub mod loader;
mod similarity;
mod vocabulary;

pub use embedder::BagOfWordsEmbedder;
pub use loader::load_vocabulary;
pub use similarity::cosine_similarity;
pub use vocabulary::Vocabulary;

/// Similarity threshold recommendations
pub mod thresholds {
    /// Default duplicate threshold for the cosine score
    pub const DEFAULT: f64 = 0.85;

    /// Lowest threshold the interactive front end offered
    pub const MIN_SUGGESTED: f64 = 0.5;
}

//! Text canonicalization for question pairs.
//!
//! Turns raw question strings into `NormalizedQuestion` values that every
//! feature extractor and the embedder consume.

mod normalize;
mod stopwords;
mod tables;

pub use normalize::{NormalizedQuestion, Normalizer};
pub use stopwords::StopWords;
pub use tables::NormalizerTables;

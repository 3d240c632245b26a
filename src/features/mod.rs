//! Pairwise feature extractors.
//!
//! Every extractor is a pure function over two `NormalizedQuestion` values.
//! The pipeline concatenates their outputs in the order fixed by [`layout`].

pub mod fuzzy;
pub mod layout;
pub mod lcs;
pub mod lexical;

pub use fuzzy::FuzzyScores;
pub use layout::{FEATURE_COUNT, FEATURE_NAMES, FeatureGroup, FeatureVector, offsets};

/// Added to ratio denominators so empty questions never divide by zero.
pub const SAFE_DIV: f64 = 0.0001;

pub mod cli;
pub mod config;
pub mod display;
pub mod features;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod text;
pub mod types;
pub mod vector;

pub use config::Settings;
pub use features::{FEATURE_COUNT, FeatureGroup, FeatureVector};
pub use pipeline::{PairOutcome, PipelineError, PipelineResult, QuestionPair, QuestionPipeline};
pub use text::{NormalizedQuestion, Normalizer, StopWords};
pub use types::{SimilarityBand, SimilarityResult};
pub use vector::{Vocabulary, load_vocabulary};

//! Error types for the feature pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Which side of a question pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSide {
    First,
    Second,
}

impl std::fmt::Display for QuestionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Errors from building or running the feature pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("The {which} question is empty")]
    InvalidInput { which: QuestionSide },

    #[error("No vocabulary loaded. Provide one with --vocab or set vocabulary_path in settings")]
    VocabularyUnavailable,

    #[error("Invalid vocabulary: {reason}")]
    InvalidVocabulary { reason: String },

    #[error("Failed to load vocabulary from {}: {reason}", path.display())]
    VocabularyLoad { path: PathBuf, reason: String },

    #[error("Similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

impl PipelineError {
    /// Recovery suggestions shown next to the error in CLI output.
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidInput { .. } => vec!["Please enter both questions before comparing"],
            Self::VocabularyUnavailable => vec![
                "Pass a vocabulary file: qsim compare --vocab vocab.json ...",
                "Or set vocabulary_path in .qsim/settings.toml",
            ],
            Self::InvalidVocabulary { .. } | Self::VocabularyLoad { .. } => {
                vec!["Vocabulary files are a JSON object {\"token\": index} or one token per line"]
            }
            Self::InvalidThreshold(_) => vec!["Use a threshold such as 0.85"],
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

//! Unified JSON output envelope for CLI commands.
//!
//! Every command prints this structure when `--json` is used, so scripts can
//! rely on one shape for results and errors alike.

use serde::{Deserialize, Serialize};

use super::ExitCode;
use crate::pipeline::PipelineError;

/// Schema version for this envelope format.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Message type for stream discrimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Successful result
    Result,
    /// Error occurred
    Error,
}

/// Operation outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// Machine-readable result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Ok,
    InvalidInput,
    VocabularyError,
}

impl ResultCode {
    /// Result code for a pipeline error.
    pub fn from_error(error: &PipelineError) -> Self {
        match error {
            PipelineError::InvalidInput { .. } | PipelineError::InvalidThreshold(_) => {
                Self::InvalidInput
            }
            PipelineError::VocabularyUnavailable
            | PipelineError::InvalidVocabulary { .. }
            | PipelineError::VocabularyLoad { .. } => Self::VocabularyError,
        }
    }

    /// Process exit code matching this result.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Ok => ExitCode::Success,
            Self::InvalidInput => ExitCode::InvalidInput,
            Self::VocabularyError => ExitCode::VocabularyError,
        }
    }
}

/// Entity type in the data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Comparison,
    Features,
    Normalization,
    Batch,
}

/// Unified JSON output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    /// Message type for stream discrimination
    #[serde(rename = "type")]
    pub message_type: MessageType,

    /// Operation outcome
    pub status: Status,

    /// Machine-readable result code
    pub code: ResultCode,

    /// Unix exit code (0-255)
    pub exit_code: u8,

    /// Human-readable message
    pub message: String,

    /// Result payload (null on error)
    pub data: Option<T>,

    /// Error details (null on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,

    /// Response metadata
    pub meta: Meta,
}

/// Error details with suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Recovery suggestions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Response metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version (semver)
    pub schema_version: String,

    /// Entity type in data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    /// Number of items in data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Duplicate threshold used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Vocabulary dimension used for embeddings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_size: Option<usize>,

    /// Execution time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            entity_type: None,
            count: None,
            threshold: None,
            vocabulary_size: None,
            duration_ms: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Create a success envelope with data.
    pub fn success(data: T) -> Self {
        Self {
            message_type: MessageType::Result,
            status: Status::Success,
            code: ResultCode::Ok,
            exit_code: 0,
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            error: None,
            meta: Meta::default(),
        }
    }

    /// Create an error envelope.
    pub fn error(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Error,
            status: Status::Error,
            code,
            exit_code: code.exit_code() as u8,
            message: message.into(),
            data: None,
            error: None,
            meta: Meta::default(),
        }
    }

    /// Create an error envelope from a pipeline error, with suggestions.
    pub fn from_pipeline_error(error: &PipelineError) -> Self {
        Self::error(ResultCode::from_error(error), error.to_string()).with_error_details(
            ErrorDetails {
                suggestions: error.suggestions().into_iter().map(String::from).collect(),
            },
        )
    }

    /// Add custom message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set entity type in metadata.
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.meta.entity_type = Some(entity_type);
        self
    }

    /// Set count in metadata.
    pub fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }

    /// Set threshold in metadata.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.meta.threshold = Some(threshold);
        self
    }

    /// Set vocabulary size in metadata.
    pub fn with_vocabulary_size(mut self, size: usize) -> Self {
        self.meta.vocabulary_size = Some(size);
        self
    }

    /// Set duration in metadata.
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.meta.duration_ms = Some(duration_ms);
        self
    }

    /// Set error details.
    pub fn with_error_details(mut self, details: ErrorDetails) -> Self {
        self.error = Some(details);
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

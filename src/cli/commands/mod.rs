//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module and returns the exit code
//! for `main` to hand back to the shell.

pub mod batch;
pub mod compare;
pub mod features;
pub mod init;
pub mod normalize;

use std::path::Path;

use crate::config::Settings;
use crate::io::{Envelope, ExitCode};
use crate::pipeline::{PipelineError, PipelineResult, QuestionPipeline, QuestionSide};
use crate::vector::load_vocabulary;

/// Build a pipeline from `--vocab`, falling back to `vocabulary_path` in settings.
pub fn build_pipeline(settings: &Settings, vocab: Option<&Path>) -> PipelineResult<QuestionPipeline> {
    let path = match vocab {
        Some(path) => path.to_path_buf(),
        None => settings
            .resolved_vocabulary_path()
            .ok_or(PipelineError::VocabularyUnavailable)?,
    };

    let vocabulary = load_vocabulary(&path)?;
    QuestionPipeline::builder()
        .settings(settings)
        .vocabulary(vocabulary)
        .build()
}

/// Reject blank questions before any work is done.
pub fn require_questions(question_a: &str, question_b: &str) -> PipelineResult<()> {
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
    Ok(())
}

/// Print a pipeline error, as an envelope in JSON mode, and return its exit code.
pub fn report_error(error: &PipelineError, json: bool) -> ExitCode {
    let envelope: Envelope<()> = Envelope::from_pipeline_error(error);

    if json {
        match envelope.to_json() {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Error: {error} (failed to serialize: {e})"),
        }
    } else {
        match error {
            PipelineError::InvalidInput { .. } => eprintln!("Warning: {error}"),
            _ => eprintln!("Error: {error}"),
        }
        for suggestion in error.suggestions() {
            eprintln!("  {suggestion}");
        }
    }

    envelope.code.exit_code()
}

/// Print a success envelope and map serialization failures to an exit code.
pub fn print_envelope<T: serde::Serialize>(envelope: &Envelope<T>) -> ExitCode {
    match envelope.to_json() {
        Ok(out) => {
            println!("{out}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {e}");
            ExitCode::GeneralError
        }
    }
}

//! Compare command - score one pair and print the verdict.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use super::{build_pipeline, print_envelope, report_error, require_questions};
use crate::config::Settings;
use crate::display::theme::Theme;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::pipeline::PipelineResult;
use crate::types::{SimilarityBand, SimilarityResult, validate_threshold};
use crate::vector::thresholds;

#[derive(Debug, Serialize)]
struct Comparison {
    question_a: String,
    question_b: String,
    #[serde(flatten)]
    result: SimilarityResult,
    band: SimilarityBand,
}

/// Run compare command.
pub fn run(
    question_a: &str,
    question_b: &str,
    threshold: Option<f64>,
    vocab: Option<&Path>,
    settings: &Settings,
    json: bool,
) -> ExitCode {
    let threshold = threshold.unwrap_or(settings.scoring.threshold);
    let start = Instant::now();

    match execute(question_a, question_b, threshold, vocab, settings) {
        Ok((result, vocabulary_size)) => {
            if json {
                let comparison = Comparison {
                    question_a: question_a.to_string(),
                    question_b: question_b.to_string(),
                    result,
                    band: SimilarityBand::of(result.cosine_sim),
                };
                let envelope = Envelope::success(comparison)
                    .with_entity_type(EntityType::Comparison)
                    .with_threshold(threshold)
                    .with_vocabulary_size(vocabulary_size)
                    .with_duration_ms(start.elapsed().as_millis() as u64)
                    .with_message(if result.is_duplicate {
                        "Questions are duplicates"
                    } else {
                        "Questions are not duplicates"
                    });
                print_envelope(&envelope)
            } else {
                println!("Similarity: {}", Theme::score(result.cosine_sim));
                println!("Threshold:  {threshold:.2}");
                println!("Verdict:    {}", Theme::verdict(result.is_duplicate));
                ExitCode::Success
            }
        }
        Err(e) => report_error(&e, json),
    }
}

fn execute(
    question_a: &str,
    question_b: &str,
    threshold: f64,
    vocab: Option<&Path>,
    settings: &Settings,
) -> PipelineResult<(SimilarityResult, usize)> {
    require_questions(question_a, question_b)?;
    validate_threshold(threshold)?;
    if threshold < thresholds::MIN_SUGGESTED {
        tracing::warn!(
            target: "config",
            "Threshold {threshold} is below {}, most pairs will be flagged",
            thresholds::MIN_SUGGESTED
        );
    }

    let pipeline = build_pipeline(settings, vocab)?;
    let result = pipeline.compare(question_a, question_b, threshold)?;

    tracing::debug!(
        target: "pipeline",
        "Compared pair: cosine={:.4} duplicate={}",
        result.cosine_sim,
        result.is_duplicate
    );

    Ok((result, pipeline.vocabulary().dimension()))
}

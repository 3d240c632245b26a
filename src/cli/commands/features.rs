//! Features command - print the full feature vector for one pair.

use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;
use serde::Serialize;

use super::{build_pipeline, print_envelope, report_error, require_questions};
use crate::config::Settings;
use crate::display::tables::create_feature_tables;
use crate::display::theme::Theme;
use crate::features::{FEATURE_COUNT, FeatureVector};
use crate::io::{EntityType, Envelope, ExitCode};
use crate::pipeline::PipelineResult;

#[derive(Debug, Serialize)]
struct FeatureReport {
    question_a: String,
    question_b: String,
    vector: FeatureVector,
    named: IndexMap<&'static str, f64>,
}

/// Run features command.
pub fn run(
    question_a: &str,
    question_b: &str,
    vocab: Option<&Path>,
    settings: &Settings,
    json: bool,
) -> ExitCode {
    let start = Instant::now();

    let (features, vocabulary_size, coverage) =
        match execute(question_a, question_b, vocab, settings) {
            Ok(computed) => computed,
            Err(e) => return report_error(&e, json),
        };

    if json {
        let report = FeatureReport {
            question_a: question_a.to_string(),
            question_b: question_b.to_string(),
            vector: features,
            named: features.named(),
        };
        let envelope = Envelope::success(report)
            .with_entity_type(EntityType::Features)
            .with_count(FEATURE_COUNT)
            .with_vocabulary_size(vocabulary_size)
            .with_duration_ms(start.elapsed().as_millis() as u64)
            .with_message(format!("Computed {FEATURE_COUNT} features"));
        return print_envelope(&envelope);
    }

    for (group, table) in create_feature_tables(&features) {
        println!("{}", Theme::header(group.title()));
        println!("{table}\n");
    }
    println!("Similarity: {}", Theme::score(features.cosine_similarity()));
    for (label, (known, total)) in ["Q1", "Q2"].iter().zip(coverage) {
        println!("{label} vocabulary coverage: {known}/{total} tokens");
    }

    ExitCode::Success
}

fn execute(
    question_a: &str,
    question_b: &str,
    vocab: Option<&Path>,
    settings: &Settings,
) -> PipelineResult<(FeatureVector, usize, [(usize, usize); 2])> {
    require_questions(question_a, question_b)?;

    let pipeline = build_pipeline(settings, vocab)?;
    let features = pipeline.compute_features(question_a, question_b)?;

    let coverage = [question_a, question_b].map(|raw| {
        let normalized = pipeline.normalize(raw);
        (pipeline.coverage(&normalized), normalized.token_count())
    });

    Ok((features, pipeline.vocabulary().dimension(), coverage))
}

//! Normalize command - show the cleaned text and tokens of one question.

use serde::Serialize;

use super::print_envelope;
use crate::config::Settings;
use crate::display::tables::create_normalization_table;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::text::Normalizer;

#[derive(Debug, Serialize)]
struct Normalization<'a> {
    input: &'a str,
    normalized: &'a str,
    tokens: &'a [String],
}

/// Run normalize command. Needs no vocabulary.
pub fn run(text: &str, settings: &Settings, json: bool) -> ExitCode {
    let normalizer = Normalizer::new(settings.normalizer.tables());
    let normalized = normalizer.normalize(text);

    if json {
        let envelope = Envelope::success(Normalization {
            input: text,
            normalized: normalized.text(),
            tokens: normalized.tokens(),
        })
        .with_entity_type(EntityType::Normalization)
        .with_count(normalized.token_count());
        return print_envelope(&envelope);
    }

    println!("{}", create_normalization_table(text, &normalized));
    ExitCode::Success
}

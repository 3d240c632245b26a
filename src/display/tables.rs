//! Table rendering for feature vectors and normalization output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use super::theme::Theme;
use crate::features::{FEATURE_NAMES, FeatureGroup, FeatureVector};
use crate::text::NormalizedQuestion;

fn base_table() -> Table {
    let mut table = Table::new();
    if Theme::should_disable_colors() {
        table.load_preset(ASCII_MARKDOWN);
    } else {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a feature value: counts as integers, ratios with four decimals.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// One table per feature group, each listing `#`, name and value.
pub fn create_feature_tables(features: &FeatureVector) -> Vec<(FeatureGroup, Table)> {
    FeatureGroup::ALL
        .iter()
        .map(|&group| {
            let mut table = base_table();
            table.set_header(vec!["#", "Feature", "Value"]);
            for offset in group.range() {
                table.add_row(vec![
                    Cell::new(offset).set_alignment(CellAlignment::Right),
                    Cell::new(FEATURE_NAMES[offset]),
                    Cell::new(format_value(features[offset])).set_alignment(CellAlignment::Right),
                ]);
            }
            (group, table)
        })
        .collect()
}

/// Normalized text and its tokens.
pub fn create_normalization_table(raw: &str, normalized: &NormalizedQuestion) -> Table {
    let mut table = base_table();
    table.set_header(vec!["Stage", "Value"]);
    table.add_row(vec!["Input", raw]);
    table.add_row(vec!["Normalized", normalized.text()]);
    table.add_row(vec![
        "Tokens".to_string(),
        format!("{} [{}]", normalized.token_count(), normalized.tokens().join(", ")),
    ]);
    table
}

//! Vocabulary file loading.
//!
//! Two formats are accepted:
//! - `.json`: an object mapping token to column (`{"capital": 0, "france": 1}`)
//! - anything else: one token per line, column = line order. Blank lines and
//!   lines starting with `#` are skipped.

use std::collections::HashMap;
use std::path::Path;

use super::Vocabulary;
use crate::pipeline::{PipelineError, PipelineResult};

/// Load a vocabulary from disk.
pub fn load_vocabulary(path: impl AsRef<Path>) -> PipelineResult<Vocabulary> {
    let path = path.as_ref();
    let load_error = |reason: String| PipelineError::VocabularyLoad {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let vocabulary = if is_json {
        let index: HashMap<String, usize> =
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;
        Vocabulary::from_index_map(index)?
    } else {
        Vocabulary::from_tokens(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )?
    };

    tracing::debug!(
        target: "vocabulary",
        "Loaded {} tokens from {}",
        vocabulary.dimension(),
        path.display()
    );

    Ok(vocabulary)
}

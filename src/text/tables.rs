//! Lookup tables used by the normalizer.
//!
//! The defaults below are the documented baseline. Settings can add or
//! override entries (see `NormalizerConfig`), so nothing here is treated as
//! fixed logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Symbol replacements applied before any other rewriting.
const DEFAULT_SYMBOLS: &[(&str, &str)] = &[
    ("%", " percent"),
    ("$", " dollar "),
    ("₹", " rupee "),
    ("€", " euro "),
    ("@", " at "),
    ("[math]", ""),
];

/// Whole-word contractions. Looked up before the suffix rules run.
const DEFAULT_CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "can not"),
    ("can't've", "can not have"),
    ("'cause", "because"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("couldn't've", "could not have"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hadn't've", "had not have"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'd've", "he would have"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("ma'am", "madam"),
    ("mayn't", "may not"),
    ("might've", "might have"),
    ("mightn't", "might not"),
    ("must've", "must have"),
    ("mustn't", "must not"),
    ("needn't", "need not"),
    ("o'clock", "of the clock"),
    ("oughtn't", "ought not"),
    ("shan't", "shall not"),
    ("sha'n't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("that'd", "that would"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("who'll", "who will"),
    ("who's", "who is"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("y'all", "you all"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Suffix rules for contractions the whole-word table does not cover.
/// Order matters: `n't` must run before `'s` can see a dangling apostrophe.
const DEFAULT_SUFFIXES: &[(&str, &str)] = &[
    ("'ve", " have"),
    ("n't", " not"),
    ("'re", " are"),
    ("'ll", " will"),
    ("'d", " would"),
    ("'m", " am"),
    ("'s", " is"),
];

/// Numeric magnitude suffixes expanded when directly attached to digits.
pub(crate) const MAGNITUDES: &[(char, &str)] = &[
    ('k', "000"),
    ('m', "000000"),
    ('b', "000000000"),
];

/// Replacement tables for the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerTables {
    /// Literal substring replacements, applied in order
    pub symbols: Vec<(String, String)>,

    /// Whole-word contraction expansions
    pub contractions: HashMap<String, String>,

    /// Suffix contraction rules, applied in order
    pub suffixes: Vec<(String, String)>,
}

impl Default for NormalizerTables {
    fn default() -> Self {
        Self {
            symbols: to_pairs(DEFAULT_SYMBOLS),
            contractions: DEFAULT_CONTRACTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            suffixes: to_pairs(DEFAULT_SUFFIXES),
        }
    }
}

impl NormalizerTables {
    /// Merge user-supplied symbol replacements over the current table.
    ///
    /// Existing symbols are replaced in place; new ones are appended.
    pub fn with_symbols<'a>(mut self, extra: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (from, to) in extra {
            match self.symbols.iter_mut().find(|(f, _)| f == from) {
                Some(entry) => entry.1 = to.to_string(),
                None => self.symbols.push((from.to_string(), to.to_string())),
            }
        }
        self
    }

    /// Merge user-supplied whole-word contractions over the current table.
    pub fn with_contractions<'a>(
        mut self,
        extra: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (from, to) in extra {
            self.contractions.insert(from.to_lowercase(), to.to_string());
        }
        self
    }
}

fn to_pairs(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_populated() {
        let tables = NormalizerTables::default();
        assert_eq!(tables.symbols[0], ("%".to_string(), " percent".to_string()));
        assert_eq!(tables.contractions["can't"], "can not");
        assert_eq!(tables.suffixes.len(), 7);
    }

    #[test]
    fn test_with_symbols_overrides_and_appends() {
        let tables = NormalizerTables::default().with_symbols([("$", " usd "), ("&", " and ")]);
        let dollar = tables.symbols.iter().find(|(f, _)| f == "$").unwrap();
        assert_eq!(dollar.1, " usd ");
        assert_eq!(tables.symbols.last().unwrap().0, "&");
    }

    #[test]
    fn test_with_contractions_lowercases_keys() {
        let tables = NormalizerTables::default().with_contractions([("Gonna", "going to")]);
        assert_eq!(tables.contractions["gonna"], "going to");
    }
}

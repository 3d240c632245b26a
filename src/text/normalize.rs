//! Question normalization.
//!
//! Stages run in a fixed order:
//!
//! ```text
//! lowercase → symbols → magnitudes → contractions → markup → punctuation → whitespace
//! ```
//!
//! Every stage is a pure string rewrite, so the same input always produces the
//! same `NormalizedQuestion`.
//!
//! Entities are decoded after the symbol stage, so decoded text is passed
//! through the symbol table once more: `&euro;` and `€` both become `euro`.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

use super::tables::{MAGNITUDES, NormalizerTables};

static GROUPED_NUMBER: OnceLock<Regex> = OnceLock::new();
static MAGNITUDE: OnceLock<Regex> = OnceLock::new();
static HTML_TAG: OnceLock<Regex> = OnceLock::new();
static HTML_ENTITY: OnceLock<Regex> = OnceLock::new();
static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn grouped_number() -> &'static Regex {
    GROUPED_NUMBER.get_or_init(|| Regex::new(r"\b\d{1,3}(?:,\d{3})+[kmb]?\b").expect("valid regex"))
}

fn magnitude() -> &'static Regex {
    MAGNITUDE.get_or_init(|| Regex::new(r"\b(\d+)([kmb])\b").expect("valid regex"))
}

fn html_tag() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"<[^<>]*>").expect("valid regex"))
}

fn html_entity() -> &'static Regex {
    HTML_ENTITY.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);").expect("valid regex")
    })
}

fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("valid regex"))
}

/// A question after normalization, with its whitespace token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuestion {
    text: String,
    tokens: Vec<String>,
}

impl NormalizedQuestion {
    /// Wrap already-normalized text. Tokens are derived by whitespace split.
    pub fn from_normalized(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Canonicalizes raw question text.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    tables: NormalizerTables,
}

impl Normalizer {
    pub fn new(tables: NormalizerTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &NormalizerTables {
        &self.tables
    }

    /// Run every stage over `raw`.
    pub fn normalize(&self, raw: &str) -> NormalizedQuestion {
        let text = raw.trim().to_lowercase();
        let text = self.replace_symbols(text);
        let text = expand_magnitudes(&text);
        let text = self.expand_contractions(&text);
        let text = self.strip_markup(&text);
        let text = non_word().replace_all(&text, " ");
        NormalizedQuestion::from_normalized(collapse_whitespace(&text))
    }

    fn replace_symbols(&self, mut text: String) -> String {
        for (from, to) in &self.tables.symbols {
            if !from.is_empty() && text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        text
    }

    fn expand_contractions(&self, text: &str) -> String {
        let text = text.replace(['\u{2019}', '\u{2018}', '`'], "'");

        let words: Vec<String> = text
            .split_whitespace()
            .map(|word| self.expand_word(word))
            .collect();
        let mut text = words.join(" ");

        for (from, to) in &self.tables.suffixes {
            if !from.is_empty() && text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        text
    }

    /// Remove HTML tags and decode entities. Names the decoder does not know
    /// are dropped rather than left behind as words.
    fn strip_markup(&self, text: &str) -> String {
        let untagged = html_tag().replace_all(text, " ");
        match html_escape::decode_html_entities(&untagged) {
            Cow::Borrowed(plain) => html_entity().replace_all(plain, " ").into_owned(),
            Cow::Owned(decoded) => {
                let decoded = self.replace_symbols(decoded.to_lowercase());
                html_entity().replace_all(&decoded, " ").into_owned()
            }
        }
    }

    /// Look up a single word in the contraction table, keeping any
    /// surrounding punctuation intact.
    fn expand_word(&self, word: &str) -> String {
        let is_edge = |c: char| !c.is_alphanumeric() && c != '\'';
        let core = word.trim_matches(is_edge);
        if core.is_empty() {
            return word.to_string();
        }
        match self.tables.contractions.get(core) {
            Some(expanded) => {
                let start = word.len() - word.trim_start_matches(is_edge).len();
                let end = start + core.len();
                format!("{}{}{}", &word[..start], expanded, &word[end..])
            }
            None => word.to_string(),
        }
    }
}

/// Drop digit-grouping commas (a magnitude suffix may follow), then expand `5k`, `3m`, `2b` style suffixes.
fn expand_magnitudes(text: &str) -> String {
    let ungrouped = grouped_number().replace_all(text, |caps: &Captures| caps[0].replace(',', ""));
    magnitude()
        .replace_all(&ungrouped, |caps: &Captures| {
            let suffix = caps[2].chars().next().unwrap_or_default();
            let zeros = MAGNITUDES
                .iter()
                .find(|(c, _)| *c == suffix)
                .map(|(_, zeros)| *zeros)
                .unwrap_or_default();
            format!("{}{}", &caps[1], zeros)
        })
        .into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> String {
        Normalizer::default().normalize(text).text().to_string()
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(norm("What is the Capital of FRANCE?"), "what is the capital of france");
    }

    #[test]
    fn test_symbol_replacement() {
        assert_eq!(norm("Is 50% off worth $20?"), "is 50 percent off worth dollar 20");
        assert_eq!(norm("email me @ home"), "email me at home");
        assert_eq!(norm("₹500 or €5"), "rupee 500 or euro 5");
    }

    #[test]
    fn test_magnitude_expansion() {
        assert_eq!(norm("I earn 5k a month"), "i earn 5000 a month");
        assert_eq!(norm("2m users"), "2000000 users");
        assert_eq!(norm("a 1b valuation"), "a 1000000000 valuation");
        assert_eq!(norm("1,000,000 people"), "1000000 people");
        assert_eq!(norm("1,000k"), "1000000");
        assert_eq!(norm("raised 2,500m"), "raised 2500000000");
        // Letters not attached to digits are untouched
        assert_eq!(norm("k means"), "k means");
    }

    #[test]
    fn test_contractions() {
        assert_eq!(norm("I can't do it"), "i can not do it");
        assert_eq!(norm("Why won't it work?"), "why will not it work");
        assert_eq!(norm("They've gone"), "they have gone");
        assert_eq!(norm("Shouldn’t we?"), "should not we");
        assert_eq!(norm("John's car"), "john is car");
    }

    #[test]
    fn test_html_stripping() {
        assert_eq!(norm("<b>Bold</b> move"), "bold move");
        assert_eq!(norm("salt &amp; pepper"), "salt pepper");
        assert_eq!(norm("caf&eacute;"), "café");
        assert_eq!(norm("x &#60; y"), "x y");
    }

    #[test]
    fn test_named_entities_outside_common_set() {
        assert_eq!(norm("a &rarr; b &laquo;x&raquo;"), "a b x");
        assert_eq!(norm("soft&shy;ware"), "soft ware");
        assert_eq!(norm("na&iuml;ve &Uuml;ber"), "naïve über");
        // Unknown names never survive as tokens
        assert_eq!(norm("foo &zzz; bar"), "foo bar");
    }

    #[test]
    fn test_decoded_entities_get_symbol_words() {
        assert_eq!(norm("5 &euro; fee"), norm("5 € fee"));
        assert_eq!(norm("5 &euro; fee"), "5 euro fee");
        assert_eq!(norm("100&#37; sure"), "100 percent sure");
        assert_eq!(norm("mail &commat; home"), "mail at home");
    }

    #[test]
    fn test_math_marker_removed() {
        assert_eq!(norm("[math]x^2[/math] roots"), "x 2 math roots");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(Normalizer::default().normalize("").is_empty());
        assert!(Normalizer::default().normalize("   ").is_empty());
        assert!(Normalizer::default().normalize("?!...,;").is_empty());
    }

    #[test]
    fn test_tokens_and_lengths() {
        let q = Normalizer::default().normalize("  How   do I learn  Rust? ");
        assert_eq!(q.text(), "how do i learn rust");
        assert_eq!(q.tokens(), &["how", "do", "i", "learn", "rust"]);
        assert_eq!(q.token_count(), 5);
        assert_eq!(q.char_len(), 19);
    }

    #[test]
    fn test_deterministic() {
        let normalizer = Normalizer::default();
        let input = "What's the <i>best</i> way to earn $10k?";
        assert_eq!(normalizer.normalize(input), normalizer.normalize(input));
    }
}

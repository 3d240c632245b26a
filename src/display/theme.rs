//! Color decisions for terminal output.

use console::{StyledObject, style};

use crate::types::SimilarityBand;

pub struct Theme;

impl Theme {
    /// True when colors must be suppressed (`NO_COLOR`, dumb terminal, or piped stdout).
    pub fn should_disable_colors() -> bool {
        std::env::var_os("NO_COLOR").is_some() || !console::colors_enabled()
    }

    /// Section header, e.g. "Token features".
    pub fn header(text: &str) -> String {
        if Self::should_disable_colors() {
            format!("{text}:")
        } else {
            format!("{}", style(format!("{text}:")).cyan().bold())
        }
    }

    /// Score colored by similarity band.
    pub fn score(score: f64) -> String {
        let text = format!("{score:.4}");
        if Self::should_disable_colors() {
            return text;
        }
        Self::banded(style(text), SimilarityBand::of(score)).to_string()
    }

    /// Verdict line for a comparison.
    pub fn verdict(is_duplicate: bool) -> String {
        let text = if is_duplicate {
            "DUPLICATE"
        } else {
            "NOT DUPLICATE"
        };
        if Self::should_disable_colors() {
            text.to_string()
        } else if is_duplicate {
            style(text).green().bold().to_string()
        } else {
            style(text).yellow().bold().to_string()
        }
    }

    fn banded<D>(styled: StyledObject<D>, band: SimilarityBand) -> StyledObject<D> {
        match band {
            SimilarityBand::High => styled.green(),
            SimilarityBand::Medium => styled.yellow(),
            SimilarityBand::Low => styled.red(),
        }
    }
}

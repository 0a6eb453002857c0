//! Text preparation for read-aloud.

use once_cell::sync::Lazy;
use regex::Regex;

/// Descendants that are decorative, visually hidden or controls, and must not be spoken.
pub const UNREADABLE_SELECTOR: &str = ".section-actions, .sr-only, [aria-hidden=\"true\"]";

static WHITESPACE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\s+").ok());

/// Collapse every whitespace run to one space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE
        .as_ref()
        .map(|re| re.replace_all(text, " ").trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_tabs() {
        assert_eq!(
            collapse_whitespace("\n  Título\n\n\tParágrafo   um. \n"),
            "Título Parágrafo um."
        );
    }

    #[test]
    fn blank_text_collapses_to_empty() {
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }
}

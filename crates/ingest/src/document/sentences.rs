//! Sentence segmentation tolerant of scholarly abbreviations.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Dr|Mr|Mrs|Ms|Prof|Jr|Sr|vs|etc|i\.e|e\.g|vol|Vol|par|pars|cf|Cf)\.\s+")
        .expect("hardcoded regex pattern is valid")
});
static PAIRED_INITIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z])\.\s+([A-Z])\.\s+").expect("hardcoded regex pattern is valid")
});
static TERMINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("hardcoded regex pattern is valid"));

/// Split a paragraph into sentences.
///
/// A boundary is terminal punctuation followed by whitespace and then an
/// ASCII capital or a quote. Whitespace between sentences is dropped, so
/// joining the result with spaces is a reflow of the input, not a copy.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let protected = protected_periods(paragraph);

    let mut sentences = Vec::new();
    let mut start = 0;
    for m in TERMINAL.find_iter(paragraph) {
        if protected.contains(&m.start()) {
            continue;
        }
        let opens_sentence = paragraph[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c == '"' || c == '\'');
        if opens_sentence {
            push_sentence(&mut sentences, &paragraph[start..m.start() + 1]);
            start = m.end();
        }
    }
    push_sentence(&mut sentences, &paragraph[start..]);
    sentences
}

/// Byte offsets of periods that close an abbreviation or an initial.
fn protected_periods(text: &str) -> HashSet<usize> {
    let mut offsets = HashSet::new();
    for caps in ABBREVIATION.captures_iter(text) {
        offsets.extend(caps.get(1).map(|m| m.end()));
    }
    for caps in PAIRED_INITIALS.captures_iter(text) {
        offsets.extend([caps.get(1), caps.get(2)].into_iter().flatten().map(|m| m.end()));
    }
    offsets
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let s = split_sentences("The dream recurs. It changes each time! Does it matter? \"Yes,\" he said.");
        assert_eq!(
            s,
            vec![
                "The dream recurs.",
                "It changes each time!",
                "Does it matter?",
                "\"Yes,\" he said.",
            ]
        );
    }

    #[test]
    fn keeps_titles_and_latin_abbreviations() {
        let s = split_sentences("Dr. Freud objected, cf. Adler. Prof. Bleuler agreed, e.g. About this.");
        assert_eq!(
            s,
            vec!["Dr. Freud objected, cf. Adler.", "Prof. Bleuler agreed, e.g. About this."]
        );
    }

    #[test]
    fn keeps_paired_initials() {
        let s = split_sentences("This was written by C. G. Jung in Zurich. He was old.");
        assert_eq!(s, vec!["This was written by C. G. Jung in Zurich.", "He was old."]);
    }

    #[test]
    fn digit_after_period_is_not_a_boundary() {
        let s = split_sentences("See CW. 9 for the details. The argument follows.");
        assert_eq!(s, vec!["See CW. 9 for the details.", "The argument follows."]);
    }

    #[test]
    fn private_use_characters_pass_through() {
        let s = split_sentences("The glyph \u{E000} marks a ligature. Next sentence.");
        assert_eq!(s, vec!["The glyph \u{E000} marks a ligature.", "Next sentence."]);

        let s = split_sentences("Dr. \u{E000} Smith wrote it. He agreed.");
        assert_eq!(s, vec!["Dr. \u{E000} Smith wrote it.", "He agreed."]);
    }

    #[test]
    fn lowercase_after_period_is_not_a_boundary() {
        let s = split_sentences("The value was 3.5 in total. and then more text.");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn never_returns_empty_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n  ").is_empty());
        let s = split_sentences("One.   \n\n  Two.");
        assert_eq!(s, vec!["One.", "Two."]);
    }

    #[test]
    fn reflow_preserves_words() {
        let input = "First line\nwraps here. Second   sentence follows. Third.";
        let joined = split_sentences(input).join(" ");
        let original: Vec<&str> = input.split_whitespace().collect();
        let reflowed: Vec<&str> = joined.split_whitespace().collect();
        assert_eq!(original, reflowed);
    }
}

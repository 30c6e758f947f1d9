use std::sync::LazyLock;

use regex::Regex;

/// Paragraphs shorter than this are never treated as index entries.
const MIN_INDEX_WORDS: usize = 10;
/// Page references per word above which a paragraph reads as an index.
const PAGE_REF_RATIO: f64 = 0.15;

static PAGE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*\d{1,4}(?:\s*-\s*\d{1,4})?").expect("hardcoded regex pattern is valid")
});

/// True when `text` looks like a back-of-book index entry ("Self, 12, 45-47, ...").
pub fn is_index_content(text: &str) -> bool {
    let words = text.split_whitespace().count();
    if words < MIN_INDEX_WORDS {
        return false;
    }
    let page_refs = PAGE_REF.find_iter(text).count();
    page_refs as f64 > words as f64 * PAGE_REF_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_entries_are_flagged() {
        let entry = "anima, 12, 45-47, 103; projection of, 88, 91, 204-6; and shadow, 7, 19, 311";
        assert!(is_index_content(entry));
    }

    #[test]
    fn prose_is_kept() {
        let prose = "In 1912, at the age of 37, he published a book that would, in time, \
                     change the direction of his work entirely.";
        assert!(!is_index_content(prose));
    }

    #[test]
    fn short_paragraphs_are_never_index() {
        assert!(!is_index_content("Self, 1, 2, 3, 4"));
    }
}

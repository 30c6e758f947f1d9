//! Work metadata (title, year, Collected Works volume) from source filenames.

use std::path::Path;
use std::sync::LazyLock;

use folio_core::WorkMetadata;
use regex::Regex;

static YEAR_IN_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4})\)").expect("hardcoded regex pattern is valid"));
static VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Volume\s*(\d+)").expect("hardcoded regex pattern is valid"));
static LEADING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([^)]+\)\s*").expect("hardcoded regex pattern is valid"));
static PUBLISHER_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*-\s*(Princeton|Routledge|Norton|Vintage).*$")
        .expect("hardcoded regex pattern is valid")
});
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").expect("hardcoded regex pattern is valid"));
static HAS_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{4}").expect("hardcoded regex pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded regex pattern is valid"));

/// Curated titles keyed by a filename fragment. Order matters: the first
/// fragment contained in the stem (case-insensitively) wins.
const TITLE_TABLE: &[(&str, &str)] = &[
    ("Letters of C. G. Jung Vol 1", "Letters of C. G. Jung, Vol. 1 (1906-1950)"),
    ("Letters of C. G. Jung Vol 2", "Letters of C. G. Jung, Vol. 2 (1951-1961)"),
    ("The Collected Works of Jung I-XX", "The Collected Works of C. G. Jung"),
    ("Collected-Works-Volume-9i", "Archetypes of the Collective Unconscious (CW 9i)"),
    ("Freud_Jung letters", "The Freud/Jung Letters"),
    ("History of Modern History", "History of Modern Psychology (ETH Lectures Vol. 1)"),
    ("Jung Contra Freud", "Jung Contra Freud"),
    ("practice of psychotherapy", "The Practice of Psychotherapy (CW 16)"),
    ("Active Imagination", "Jung on Active Imagination"),
    (
        "Analytical Psychology in Exile",
        "Analytical Psychology in Exile: Jung-Neumann Correspondence",
    ),
    (
        "Question of Psychological Types",
        "The Question of Psychological Types: Jung-Schmid Correspondence",
    ),
    ("Atom and Archetype", "Atom and Archetype: The Pauli/Jung Letters"),
    (
        "On Theology and Psychology",
        "On Theology and Psychology: Jung-Keller Correspondence",
    ),
    ("Psychology of Kundalini", "The Psychology of Kundalini Yoga (1932 Seminar)"),
    (
        "Psychology of Yoga and Meditation",
        "Psychology of Yoga and Meditation (ETH Lectures Vol. 6)",
    ),
    ("Ignatius of Loyola", "Jung on Ignatius of Loyola (ETH Lectures Vol. 7)"),
    ("Dream Symbols of the Individuation", "Dream Symbols of the Individuation Process"),
    ("Children's Dreams", "Children's Dreams (1936-1940 Seminar)"),
    (
        "Dream Interpretation Ancient",
        "Dream Interpretation Ancient and Modern (1936-1941 Seminar)",
    ),
    ("Seminar on Dream Analysis", "Seminar on Dream Analysis (1928-1930)"),
    ("Analytical Psychology_ Notes of the Seminar", "Analytical Psychology (1925 Seminar)"),
    ("Introduction to Jungian psychology", "Introduction to Jungian Psychology (1925 Seminar)"),
    ("Visions _ Notes", "Visions Seminar (1930-1934)"),
    ("Zarathustra", "Nietzsche's Zarathustra (1934-1939 Seminar)"),
    (
        "On Psychological and Visionary Art",
        "On Psychological and Visionary Art: Nerval's Aurélia",
    ),
    ("Red Book", "The Red Book: A Reader's Edition"),
    ("Man and His Symbols", "Man and His Symbols"),
    ("Memories, Dreams, Reflections", "Memories, Dreams, Reflections"),
    ("Modern Man in Search", "Modern Man in Search of a Soul"),
    ("Psychology of the Unconscious", "Psychology of the Unconscious"),
    ("Selected Letters", "Selected Letters of C. G. Jung"),
    ("C. G. Jung Speaking", "C. G. Jung Speaking: Interviews and Encounters"),
];

/// Resolve title, year and volume from a filename (directory already removed).
///
/// Never returns an empty title: when the heuristics strip everything, the
/// raw stem is used verbatim.
pub fn resolve_work_metadata(filename: &str) -> WorkMetadata {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let year = YEAR_IN_PARENS
        .captures_iter(stem)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u16>().ok());

    let cw_volume = VOLUME
        .captures(stem)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    let mut title = lookup_title(stem)
        .map(str::to_string)
        .unwrap_or_else(|| derive_title(stem));

    if let Some(year) = year {
        if !HAS_YEAR.is_match(&title) {
            title = format!("{title} ({year:04})");
        }
    }

    let title = title.trim();
    let title = if title.is_empty() { stem } else { title };

    WorkMetadata {
        title: title.to_string(),
        year,
        cw_volume,
    }
}

fn lookup_title(stem: &str) -> Option<&'static str> {
    let lowered = stem.to_lowercase();
    TITLE_TABLE
        .iter()
        .find(|(fragment, _)| lowered.contains(&fragment.to_lowercase()))
        .map(|(_, title)| *title)
}

/// Heuristic title for filenames missing from the curated table.
fn derive_title(stem: &str) -> String {
    let title = LEADING_PARENTHETICAL.replace(stem, "");
    let after_author = title.split(" - ").nth(1).map(str::to_string);
    let title = after_author.unwrap_or_else(|| title.into_owned());
    let title = title.replace('_', " ");
    let title = PUBLISHER_TAIL.replace(&title, "");
    let title = TRAILING_YEAR.replace(&title, "");
    WHITESPACE_RUN.replace_all(&title, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookup_for_collected_works_volume() {
        let meta = resolve_work_metadata("Collected-Works-Volume-9i.epub");
        assert_eq!(meta.title, "Archetypes of the Collective Unconscious (CW 9i)");
        // "Volume-9i" has a hyphen, not whitespace, before the number.
        assert_eq!(meta.cw_volume, None);
        assert_eq!(meta.year, None);
    }

    #[test]
    fn table_lookup_is_case_insensitive() {
        let meta = resolve_work_metadata("jung - THE PRACTICE OF PSYCHOTHERAPY.txt");
        assert_eq!(meta.title, "The Practice of Psychotherapy (CW 16)");
    }

    #[test]
    fn first_table_match_wins() {
        // Mentions both "Red Book" and "Man and His Symbols"; Red Book is listed first.
        let meta = resolve_work_metadata("Man and His Symbols vs Red Book.txt");
        assert_eq!(meta.title, "The Red Book: A Reader's Edition");
    }

    #[test]
    fn year_appended_unless_title_has_one() {
        let meta = resolve_work_metadata("Man and His Symbols (1964).txt");
        assert_eq!(meta.title, "Man and His Symbols (1964)");
        assert_eq!(meta.year, Some(1964));

        let meta = resolve_work_metadata("Psychology of Kundalini (1996).txt");
        assert_eq!(meta.title, "The Psychology of Kundalini Yoga (1932 Seminar)");
        assert_eq!(meta.year, Some(1996));
    }

    #[test]
    fn appended_year_keeps_four_digits() {
        let meta = resolve_work_metadata("Foo (0999).txt");
        assert_eq!(meta.title, "Foo (0999)");
        assert_eq!(meta.year, Some(999));
    }

    #[test]
    fn last_parenthesized_year_is_used() {
        let meta = resolve_work_metadata("Some Lectures (1935) reissued (1968).txt");
        assert_eq!(meta.year, Some(1968));
        assert_eq!(meta.title, "Some Lectures (1935) reissued");
    }

    #[test]
    fn fallback_takes_segment_after_author() {
        let meta = resolve_work_metadata(
            "(Jung) C.G.Jung - Aion_ Researches into the Phenomenology of the Self - Princeton (1979).txt",
        );
        assert_eq!(
            meta.title,
            "Aion Researches into the Phenomenology of the Self (1979)"
        );
    }

    #[test]
    fn fallback_strips_publisher_tail() {
        let meta = resolve_work_metadata("Psychological_Types-Princeton_University_Press.txt");
        assert_eq!(meta.title, "Psychological Types");
    }

    #[test]
    fn volume_extracted_case_insensitively() {
        let meta = resolve_work_metadata("Collected Works volume 12 Psychology and Alchemy.txt");
        assert_eq!(meta.cw_volume, Some(12));
    }

    #[test]
    fn never_empty_falls_back_to_stem() {
        let meta = resolve_work_metadata("(Anonymous).txt");
        assert_eq!(meta.title, "(Anonymous)");
    }
}

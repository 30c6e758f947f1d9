//! Chapter, letter and essay boundary detection.
//!
//! Which heading families are searched depends on the kind of source: letters
//! volumes get dated-letter headings, the memoir gets its fixed chapter names,
//! and Collected Works volumes get all-caps essay titles. Standard
//! `Chapter/Part/Section/Lecture/Seminar` headings are always searched.

use std::sync::LazyLock;

use folio_core::{ChapterMarker, MarkerKind};
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded regex pattern is valid")
}

static STANDARD_HEADINGS: LazyLock<Vec<(Regex, MarkerKind)>> = LazyLock::new(|| {
    vec![
        (compile(r"^(CHAPTER|Chapter)\s+([IVXLCDM\d]+)[\s:.]*(.*)$"), MarkerKind::Chapter),
        (compile(r"^(PART|Part)\s+([IVXLCDM\d]+)[\s:.]*(.*)$"), MarkerKind::Part),
        (compile(r"^(SECTION|Section)\s+([IVXLCDM\d]+)[\s:.]*(.*)$"), MarkerKind::Section),
        (compile(r"^(LECTURE|Lecture)\s+([IVXLCDM\d]+)[\s:.]*(.*)$"), MarkerKind::Lecture),
        (compile(r"^(Seminar)\s+(\d+)[\s:.]*(.*)$"), MarkerKind::Seminar),
    ]
});

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static LETTER_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(&format!(r"^(\d{{1,2}})\s+({MONTHS})\s+(\d{{4}})$")),
        compile(&format!(r"^({MONTHS})\s+(\d{{1,2}}),?\s+(\d{{4}})$")),
        compile(r"^To\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*$"),
    ]
});

static MEMOIR_CHAPTERS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(Prologue|First Years|School Years|Student Years|Psychiatric Activities|Sigmund Freud|Confrontation with the Unconscious|The Work|The Tower|Travels|Visions|On Life after Death|Late Thoughts|Retrospect)$",
    )
});

static ESSAY_TITLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([A-Z][A-Z\s]{10,60})$"));

/// Structural words that disqualify an all-caps line from being an essay title.
const STRUCTURAL_KEYWORDS: &[&str] = &["CHAPTER", "PART", "SECTION", "LECTURE"];

/// Source-type flags controlling which heading families apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceKind {
    pub letters: bool,
    pub memoir: bool,
    pub collected_works: bool,
}

impl SourceKind {
    pub fn from_filename(source_file: &str) -> Self {
        let lowered = source_file.to_lowercase();
        Self {
            letters: lowered.contains("letters") || lowered.contains("correspondence"),
            memoir: lowered.contains("memories") && lowered.contains("dreams"),
            collected_works: lowered.contains("collected works")
                || source_file.contains("C.G.Jung -"),
        }
    }
}

/// Scan `text` once and return every heading marker in document order.
///
/// Offsets count characters; each line contributes its length plus one for
/// the newline. A line can produce markers from several families.
pub fn find_chapter_markers(text: &str, source_file: &str) -> Vec<ChapterMarker> {
    let kind = SourceKind::from_filename(source_file);
    let mut markers = Vec::new();
    let mut char_pos = 0usize;

    for line in text.split('\n') {
        let stripped = line.trim();

        if let Some(marker) = match_standard(stripped, char_pos) {
            markers.push(marker);
        }
        if kind.letters {
            if let Some(marker) = match_letter(stripped, char_pos) {
                markers.push(marker);
            }
        }
        if kind.memoir {
            if let Some(marker) = match_memoir(stripped, char_pos) {
                markers.push(marker);
            }
        }
        if kind.collected_works && stripped.chars().count() > 10 {
            if let Some(marker) = match_essay(stripped, char_pos) {
                markers.push(marker);
            }
        }

        char_pos += line.chars().count() + 1;
    }

    markers
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn match_standard(line: &str, char_index: usize) -> Option<ChapterMarker> {
    STANDARD_HEADINGS.iter().find_map(|(regex, kind)| {
        let caps = regex.captures(line)?;
        Some(ChapterMarker {
            char_index,
            kind: *kind,
            number: caps.get(2).and_then(|m| non_empty(m.as_str())),
            title: caps.get(3).and_then(|m| non_empty(m.as_str())),
        })
    })
}

fn match_letter(line: &str, char_index: usize) -> Option<ChapterMarker> {
    LETTER_HEADINGS
        .iter()
        .any(|regex| regex.is_match(line))
        .then(|| ChapterMarker {
            char_index,
            kind: MarkerKind::Letter,
            number: None,
            title: non_empty(line),
        })
}

fn match_memoir(line: &str, char_index: usize) -> Option<ChapterMarker> {
    let caps = MEMOIR_CHAPTERS.captures(line)?;
    Some(ChapterMarker {
        char_index,
        kind: MarkerKind::Chapter,
        number: None,
        title: caps.get(1).and_then(|m| non_empty(m.as_str())),
    })
}

fn match_essay(line: &str, char_index: usize) -> Option<ChapterMarker> {
    if !ESSAY_TITLE.is_match(line) || STRUCTURAL_KEYWORDS.iter().any(|k| line.contains(k)) {
        return None;
    }
    Some(ChapterMarker {
        char_index,
        kind: MarkerKind::Essay,
        number: None,
        title: non_empty(&title_case(line)),
    })
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

// ── Lookup ─────────────────────────────────────────────────────

/// Markers of one document with their rendered labels, answering
/// "which chapter is active at this offset".
#[derive(Debug, Clone, Default)]
pub struct ChapterIndex {
    markers: Vec<ChapterMarker>,
    labels: Vec<String>,
}

impl ChapterIndex {
    /// `markers` must be in append order, which keeps offsets nondecreasing.
    pub fn new(markers: Vec<ChapterMarker>) -> Self {
        let labels = markers.iter().map(ChapterMarker::label).collect();
        Self { markers, labels }
    }

    pub fn from_text(text: &str, source_file: &str) -> Self {
        Self::new(find_chapter_markers(text, source_file))
    }

    /// Label of the last marker at or before `pos`; on ties the marker
    /// appended last wins.
    pub fn chapter_at(&self, pos: usize) -> Option<&str> {
        let after = self.markers.partition_point(|m| m.char_index <= pos);
        after
            .checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_headings_found_everywhere() {
        let text = "Preface text\nCHAPTER IV: The Tower\nBody\nLecture 3. Dreams\nSeminar 12\n";
        let markers = find_chapter_markers(text, "anything.txt");
        assert_eq!(markers.len(), 3);

        assert_eq!(markers[0].kind, MarkerKind::Chapter);
        assert_eq!(markers[0].char_index, 13);
        assert_eq!(markers[0].number.as_deref(), Some("IV"));
        assert_eq!(markers[0].title.as_deref(), Some("The Tower"));

        assert_eq!(markers[1].label(), "Lecture 3: Dreams");
        assert_eq!(markers[2].label(), "Seminar 12");
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let text = "Zürich\nChapter 1\n";
        let markers = find_chapter_markers(text, "x.txt");
        assert_eq!(markers[0].char_index, 7);
    }

    #[test]
    fn letter_headings_only_for_letters() {
        let text = "12 March 1932\nDear Freud,\nTo Sigmund Freud\nMarch 4, 1909\n";
        assert!(find_chapter_markers(text, "Psychology and Alchemy.txt").is_empty());

        let markers = find_chapter_markers(text, "Freud_Jung letters.txt");
        let titles: Vec<_> = markers.iter().map(|m| m.label()).collect();
        assert_eq!(
            titles,
            vec![
                "Letter: 12 March 1932",
                "Letter: To Sigmund Freud",
                "Letter: March 4, 1909",
            ]
        );
    }

    #[test]
    fn memoir_chapters_only_for_memoir() {
        let text = "Prologue\ntext\nTHE TOWER\n";
        assert!(find_chapter_markers(text, "Red Book.txt").is_empty());

        let markers = find_chapter_markers(text, "Memories, Dreams, Reflections.txt");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label(), "Chapter: Prologue");
        assert_eq!(markers[1].label(), "Chapter: THE TOWER");
    }

    #[test]
    fn essay_titles_for_collected_works() {
        let text = "ON THE NATURE OF THE PSYCHE\nbody\nPART TWO OF THE ESSAY\nSHORT LINE\n";
        let markers = find_chapter_markers(text, "The Collected Works vol 8.txt");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, MarkerKind::Essay);
        assert_eq!(markers[0].title.as_deref(), Some("On The Nature Of The Psyche"));

        assert!(find_chapter_markers(text, "Aion.txt").is_empty());
    }

    #[test]
    fn source_kind_flags() {
        let k = SourceKind::from_filename("Atom and Archetype - Correspondence.txt");
        assert!(k.letters && !k.memoir && !k.collected_works);
        let k = SourceKind::from_filename("C.G.Jung - Aion.txt");
        assert!(k.collected_works);
    }

    #[test]
    fn chapter_at_returns_last_marker_at_or_before() {
        let index = ChapterIndex::from_text("Chapter 1\nbody\nChapter 2\nbody\n", "x.txt");
        assert_eq!(index.chapter_at(0), Some("Chapter 1"));
        assert_eq!(index.chapter_at(14), Some("Chapter 1"));
        assert_eq!(index.chapter_at(15), Some("Chapter 2"));
        assert_eq!(index.chapter_at(1000), Some("Chapter 2"));

        let late = ChapterIndex::from_text("intro\nChapter 1\n", "x.txt");
        assert_eq!(late.chapter_at(3), None);
    }

    #[test]
    fn ties_resolve_to_last_appended() {
        let index = ChapterIndex::new(vec![
            ChapterMarker {
                char_index: 5,
                kind: MarkerKind::Chapter,
                number: Some("1".into()),
                title: None,
            },
            ChapterMarker {
                char_index: 5,
                kind: MarkerKind::Letter,
                number: None,
                title: Some("To Jung".into()),
            },
        ]);
        assert_eq!(index.chapter_at(5), Some("Letter: To Jung"));
        assert_eq!(index.chapter_at(4), None);
    }

    #[test]
    fn title_case_matches_word_runs() {
        assert_eq!(title_case("THE SPIRIT MERCURIUS"), "The Spirit Mercurius");
    }
}

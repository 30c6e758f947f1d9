use serde::{Deserialize, Serialize};

/// Deterministic fingerprint of a chunk: 16 lowercase hex digits.
pub type ChunkId = String;

/// A bounded passage of a source work, ready for embedding and citation.
///
/// Only `total_chunks`, `prev_chunk_id` and `next_chunk_id` change after
/// creation, and only during the assembler's final linking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    /// Display text: paragraphs separated by a blank line, sentences by one space.
    pub text: String,
    /// `text` with the retrieval-model prefix; only ever fed to the embedder.
    pub text_for_embedding: String,
    pub source_file: String,
    pub work_title: String,
    /// Structural label active when the chunk was flushed.
    pub chapter: Option<String>,
    /// 0-based position in the document's chunk sequence.
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub token_count: usize,
    /// Length of `text` in characters.
    pub char_count: usize,
    /// Character offset into the source document (inclusive).
    pub start_char: usize,
    /// Character offset into the source document (exclusive).
    pub end_char: usize,
    pub prev_chunk_id: Option<ChunkId>,
    pub next_chunk_id: Option<ChunkId>,
    /// Matched concept keys in vocabulary order.
    pub concepts: Vec<String>,
}

impl Chunk {
    pub fn has_concepts(&self) -> bool {
        !self.concepts.is_empty()
    }
}

// ── Structural markers ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Chapter,
    Part,
    Section,
    Lecture,
    Seminar,
    Letter,
    Essay,
}

impl MarkerKind {
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Chapter => "Chapter",
            MarkerKind::Part => "Part",
            MarkerKind::Section => "Section",
            MarkerKind::Lecture => "Lecture",
            MarkerKind::Seminar => "Seminar",
            MarkerKind::Letter => "Letter",
            MarkerKind::Essay => "Essay",
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A structural boundary detected in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMarker {
    /// Character offset of the start of the heading line.
    pub char_index: usize,
    pub kind: MarkerKind,
    pub number: Option<String>,
    pub title: Option<String>,
}

impl ChapterMarker {
    /// Human label, e.g. `Chapter IV: The Tower` or `Letter: To Sigmund Freud`.
    pub fn label(&self) -> String {
        let mut label = self.kind.label().to_string();
        if let Some(number) = &self.number {
            label.push(' ');
            label.push_str(number);
        }
        if let Some(title) = &self.title {
            label.push_str(": ");
            label.push_str(title);
        }
        label
    }
}

// ── Work metadata ─────────────────────────────────────────────

/// Bibliographic data resolved from a source filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkMetadata {
    pub title: String,
    pub year: Option<u16>,
    pub cw_volume: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_label_includes_present_parts() {
        let full = ChapterMarker {
            char_index: 0,
            kind: MarkerKind::Chapter,
            number: Some("IV".into()),
            title: Some("The Tower".into()),
        };
        assert_eq!(full.label(), "Chapter IV: The Tower");

        let bare = ChapterMarker {
            char_index: 10,
            kind: MarkerKind::Letter,
            number: None,
            title: Some("To Sigmund Freud".into()),
        };
        assert_eq!(bare.label(), "Letter: To Sigmund Freud");

        let numbered = ChapterMarker {
            char_index: 10,
            kind: MarkerKind::Seminar,
            number: Some("3".into()),
            title: None,
        };
        assert_eq!(numbered.label(), "Seminar 3");
    }

    #[test]
    fn marker_kind_serializes_as_label() {
        let json = serde_json::to_string(&MarkerKind::Essay).unwrap();
        assert_eq!(json, "\"Essay\"");
    }
}

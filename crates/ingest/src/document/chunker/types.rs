//! Assembler output and bookkeeping types.

use folio_core::{Chunk, WorkMetadata};

// ── Output ──────────────────────────────────────────────────────────────────

/// Every chunk of one source document plus its resolved metadata.
#[derive(Debug, Clone)]
pub struct ChunkedDocument {
    pub source_file: String,
    pub metadata: WorkMetadata,
    /// Number of structural markers detected in the document.
    pub marker_count: usize,
    pub chunks: Vec<Chunk>,
}

impl ChunkedDocument {
    pub fn average_tokens(&self) -> f64 {
        if self.chunks.is_empty() {
            return 0.0;
        }
        let total: usize = self.chunks.iter().map(|c| c.token_count).sum();
        total as f64 / self.chunks.len() as f64
    }

    pub fn chunks_with_concepts(&self) -> usize {
        self.chunks.iter().filter(|c| c.has_concepts()).count()
    }

    pub fn chunks_with_chapter(&self) -> usize {
        self.chunks.iter().filter(|c| c.chapter.is_some()).count()
    }
}

// ── Bookkeeping ─────────────────────────────────────────────────────────────

/// Character span `[start, end)` of a paragraph in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

/// A paragraph waiting in the buffer, already split into sentences.
pub(crate) type SentenceGroup = Vec<String>;

//! The sequential packing pass that turns paragraphs into linked chunks.

use folio_core::{Chunk, ChunkingConfig, WorkMetadata};
use tracing::debug;

use super::helpers::{chunk_id, join_paragraphs, split_paragraphs, OffsetCursor};
use super::types::{ChunkedDocument, SentenceGroup};
use crate::document::concepts::detect_concepts;
use crate::document::index_filter::is_index_content;
use crate::document::markers::ChapterIndex;
use crate::document::metadata::resolve_work_metadata;
use crate::document::sentences::split_sentences;
use crate::document::tokenizer::TokenCounter;
use crate::document::SourceDocument;
use crate::embedding::passage_text;

/// Resolve metadata, detect markers and assemble chunks for one document.
pub fn chunk_document(
    doc: &SourceDocument,
    config: &ChunkingConfig,
    tokenizer: &dyn TokenCounter,
) -> ChunkedDocument {
    let metadata = resolve_work_metadata(&doc.filename);
    let chapters = ChapterIndex::from_text(&doc.text, &doc.filename);
    let chunks = ChunkAssembler::new(config, tokenizer).assemble(
        &doc.text,
        &doc.filename,
        &metadata,
        &chapters,
    );

    ChunkedDocument {
        source_file: doc.filename.clone(),
        metadata,
        marker_count: chapters.len(),
        chunks,
    }
}

/// Packs paragraphs into chunks under the configured token budgets.
pub struct ChunkAssembler<'a> {
    config: &'a ChunkingConfig,
    tokenizer: &'a dyn TokenCounter,
}

/// Mutable state threaded through one document's paragraphs.
struct Buffer<'d> {
    source_file: &'d str,
    work_title: &'d str,
    paragraphs: Vec<SentenceGroup>,
    tokens: usize,
    chapter: Option<String>,
    /// Character offset where the buffered content begins.
    start: usize,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkAssembler<'a> {
    pub fn new(config: &'a ChunkingConfig, tokenizer: &'a dyn TokenCounter) -> Self {
        Self { config, tokenizer }
    }

    /// Assemble `text` into an ordered, linked chunk sequence.
    pub fn assemble(
        &self,
        text: &str,
        source_file: &str,
        metadata: &WorkMetadata,
        chapters: &ChapterIndex,
    ) -> Vec<Chunk> {
        let mut buf = Buffer {
            source_file,
            work_title: &metadata.title,
            paragraphs: Vec::new(),
            tokens: 0,
            chapter: None,
            start: 0,
            chunks: Vec::new(),
        };
        let mut cursor = OffsetCursor::new(text);

        for para in split_paragraphs(text) {
            let consumed = cursor.position();
            let span = cursor.locate(para);

            if is_index_content(para) {
                debug!(source = source_file, offset = span.start, "skipping index-like paragraph");
                continue;
            }

            // A chapter change always closes the current chunk.
            let chapter = chapters.chapter_at(span.start);
            if chapter != buf.chapter.as_deref() {
                self.flush(&mut buf, consumed);
                buf.chapter = chapter.map(str::to_string);
                buf.start = span.start;
            }

            let sentences = split_sentences(para);
            let para_tokens = self.tokenizer.count(para);

            if buf.tokens + para_tokens > self.config.target_tokens && !buf.paragraphs.is_empty() {
                self.flush(&mut buf, span.start);
                buf.start = span.start;
            }

            if para_tokens > self.config.max_tokens {
                if !buf.paragraphs.is_empty() {
                    self.flush(&mut buf, span.start);
                    buf.start = span.start;
                }

                // Sub-chunks report the whole paragraph's span, not their own.
                let mut group: SentenceGroup = Vec::new();
                let mut group_tokens = 0;
                for sentence in sentences {
                    let sentence_tokens = self.tokenizer.count(&sentence);
                    if group_tokens + sentence_tokens > self.config.target_tokens && !group.is_empty() {
                        buf.paragraphs.push(std::mem::take(&mut group));
                        self.flush(&mut buf, span.end);
                        group_tokens = 0;
                        buf.start = span.start;
                    }
                    group.push(sentence);
                    group_tokens += sentence_tokens;
                }

                if !group.is_empty() {
                    buf.paragraphs.push(group);
                    buf.tokens = group_tokens;
                }
            } else {
                buf.paragraphs.push(sentences);
                buf.tokens += para_tokens;
            }
        }

        self.flush(&mut buf, text.chars().count());

        let mut chunks = buf.chunks;
        link_chunks(&mut chunks);
        debug!(source = source_file, chunks = chunks.len(), "assembled document");
        chunks
    }

    /// Drain the buffer into one chunk spanning `[buf.start, end)`, unless
    /// it is under the minimum and not the first chunk of the document.
    fn flush(&self, buf: &mut Buffer<'_>, end: usize) {
        let paragraphs = std::mem::take(&mut buf.paragraphs);
        buf.tokens = 0;
        if paragraphs.is_empty() {
            return;
        }
        let start = buf.start;

        let text = join_paragraphs(&paragraphs);
        let token_count = self.tokenizer.count(&text);
        if token_count < self.config.min_tokens && !buf.chunks.is_empty() {
            debug!(
                source = buf.source_file,
                tokens = token_count,
                start,
                end,
                "dropping under-budget chunk"
            );
            return;
        }

        let chunk_index = buf.chunks.len();
        buf.chunks.push(Chunk {
            id: chunk_id(buf.source_file, start, end, chunk_index),
            text_for_embedding: passage_text(&self.config.embedding_prefix, &text),
            concepts: detect_concepts(&text),
            char_count: text.chars().count(),
            text,
            source_file: buf.source_file.to_string(),
            work_title: buf.work_title.to_string(),
            chapter: buf.chapter.clone(),
            chunk_index,
            total_chunks: 0,
            token_count,
            start_char: start,
            end_char: end,
            prev_chunk_id: None,
            next_chunk_id: None,
        });
    }
}

/// Back-fill sequence length and neighbour links in a single pass.
fn link_chunks(chunks: &mut [Chunk]) {
    let total = chunks.len();
    let ids: Vec<String> = chunks.iter().map(|c| c.id.clone()).collect();
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.total_chunks = total;
        chunk.prev_chunk_id = i.checked_sub(1).and_then(|p| ids.get(p)).cloned();
        chunk.next_chunk_id = ids.get(i + 1).cloned();
    }
}

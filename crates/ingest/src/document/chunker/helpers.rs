//! Paragraph splitting, offset tracking, joining and identity helpers.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use super::types::{SentenceGroup, Span};

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("hardcoded regex pattern is valid"));

/// Split on blank lines; paragraphs are trimmed and empty ones dropped.
pub(crate) fn split_paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Rebuild chunk text: sentences joined by a space, paragraphs by a blank line.
pub(crate) fn join_paragraphs(paragraphs: &[SentenceGroup]) -> String {
    paragraphs
        .iter()
        .map(|sentences| sentences.join(" "))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Deterministic chunk id: first 16 hex digits of SHA-256 over
/// `{source_file}:{start}:{end}:{index}`.
pub fn chunk_id(source_file: &str, start: usize, end: usize, index: usize) -> String {
    let digest = Sha256::digest(format!("{source_file}:{start}:{end}:{index}").as_bytes());
    let mut hex = format!("{digest:x}");
    hex.truncate(16);
    hex
}

/// Forward-only search cursor reporting positions in characters.
///
/// Tracks the byte position alongside so each search only scans the
/// unconsumed tail of the document.
pub(crate) struct OffsetCursor<'t> {
    text: &'t str,
    byte: usize,
    char: usize,
}

impl<'t> OffsetCursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self {
            text,
            byte: 0,
            char: 0,
        }
    }

    /// Character offset just past the last located paragraph.
    pub(crate) fn position(&self) -> usize {
        self.char
    }

    /// Find `paragraph` at or after the cursor and move past it. When the
    /// text cannot be found the span starts at the cursor instead.
    pub(crate) fn locate(&mut self, paragraph: &str) -> Span {
        let len_chars = paragraph.chars().count();
        let rest = self.text.get(self.byte..).unwrap_or("");

        match rest.find(paragraph) {
            Some(rel) => {
                let start = self.char + rest[..rel].chars().count();
                self.byte += rel + paragraph.len();
                self.char = start + len_chars;
                Span {
                    start,
                    end: self.char,
                }
            }
            None => {
                tracing::warn!(
                    offset = self.char,
                    preview = %paragraph.chars().take(40).collect::<String>(),
                    "paragraph not found after cursor, using last known offset"
                );
                let start = self.char;
                self.byte = rest
                    .char_indices()
                    .nth(len_chars)
                    .map_or(self.text.len(), |(i, _)| self.byte + i);
                self.char = start + len_chars;
                Span {
                    start,
                    end: self.char,
                }
            }
        }
    }
}

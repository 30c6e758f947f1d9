//! Passage chunking for cleaned literary and scholarly texts.
//!
//! [`document`] holds the per-document pipeline (metadata, markers, sentence
//! splitting, concept tags, assembly); [`batch`] and [`quality`] run it over
//! directories.

pub mod batch;
pub mod document;
pub mod embedding;
pub mod quality;

pub use batch::{run_batch, BatchReport};
pub use document::chunker::{chunk_document, ChunkAssembler, ChunkedDocument};
pub use document::tokenizer::{Cl100kTokenizer, TokenCounter, WhitespaceTokenizer};
pub use document::{DocumentError, SourceDocument};

//! Token-budgeted, chapter-aware passage assembly.
//!
//! Paragraphs are packed greedily up to the target budget, never across a
//! chapter change; paragraphs above the hard ceiling are split at sentence
//! boundaries. Emitted chunks are linked into a navigable sequence.

mod assembler;
mod helpers;
mod types;

pub use assembler::{chunk_document, ChunkAssembler};
pub use helpers::chunk_id;
pub use types::ChunkedDocument;

pub mod chunker;
pub mod concepts;
pub mod index_filter;
pub mod markers;
pub mod metadata;
pub mod sentences;
pub mod tokenizer;
mod txt;

use std::path::Path;

use thiserror::Error;

pub use txt::decode_txt;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One cleaned source text and the filename it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Bare filename (no directory); drives metadata and marker gating.
    pub filename: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    /// Read a cleaned `.txt` file. The filename recorded is the path's last
    /// component.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        let text = decode_txt(&bytes, &filename)?;
        Ok(Self { filename, text })
    }
}

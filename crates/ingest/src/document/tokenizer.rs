//! Token counting under a fixed sub-word vocabulary.

use std::sync::OnceLock;

use folio_core::FolioError;
use tiktoken_rs::CoreBPE;

/// Counts tokens in a text span. Implementations must be deterministic and
/// return 0 for the empty string.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// `cl100k_base` BPE, loaded once per process and shared by every worker.
#[derive(Clone, Copy)]
pub struct Cl100kTokenizer {
    bpe: &'static CoreBPE,
}

static CL100K: OnceLock<CoreBPE> = OnceLock::new();

impl Cl100kTokenizer {
    pub fn load() -> Result<Self, FolioError> {
        if let Some(bpe) = CL100K.get() {
            return Ok(Self { bpe });
        }
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| FolioError::Tokenizer(e.to_string()))?;
        Ok(Self {
            bpe: CL100K.get_or_init(|| bpe),
        })
    }
}

impl TokenCounter for Cl100kTokenizer {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }
}

impl std::fmt::Debug for Cl100kTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cl100kTokenizer")
    }
}

/// Approximate token count via whitespace splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl TokenCounter for WhitespaceTokenizer {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

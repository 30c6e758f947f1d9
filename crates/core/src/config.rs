use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

/// Like `profiled_env_opt` but keeps empty values (an empty prefix is meaningful).
fn profiled_env_raw(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        if let Ok(v) = env::var(format!("{}_{}", profile, key)) {
            return Some(v);
        }
    }
    env::var(key).ok()
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
    pub paths: PathsConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FOLIO_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("FOLIO_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingConfig::from_env_profiled(p),
            paths: PathsConfig::from_env_profiled(p),
            runtime: RuntimeConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject budgets the assembler cannot honour.
    pub fn validate(&self) -> Result<(), FolioError> {
        self.chunking.validate()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:    target={}, max={}, min={}, prefix={:?}",
            self.chunking.target_tokens,
            self.chunking.max_tokens,
            self.chunking.min_tokens,
            self.chunking.embedding_prefix
        );
        tracing::info!(
            "  paths:       input={}, output={}",
            self.paths.input_dir.display(),
            self.paths.output_dir.display()
        );
        tracing::info!("  runtime:     threads={}", self.runtime.threads);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            chunking: ChunkingConfig::default(),
            paths: PathsConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

/// Token budgets for the chunk assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Soft packing goal per chunk (default: 400).
    pub target_tokens: usize,
    /// Paragraphs above this are split at sentence granularity (default: 600).
    pub max_tokens: usize,
    /// Chunks below this are dropped unless they are the first (default: 80).
    pub min_tokens: usize,
    /// Prepended to `text` to form `text_for_embedding` (default: "passage: ").
    pub embedding_prefix: String,
}

pub const DEFAULT_TARGET_TOKENS: usize = 400;
pub const DEFAULT_MAX_TOKENS: usize = 600;
pub const DEFAULT_MIN_TOKENS: usize = 80;
pub const DEFAULT_EMBEDDING_PREFIX: &str = "passage: ";

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_tokens: DEFAULT_TARGET_TOKENS,
            max_tokens: DEFAULT_MAX_TOKENS,
            min_tokens: DEFAULT_MIN_TOKENS,
            embedding_prefix: DEFAULT_EMBEDDING_PREFIX.to_string(),
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            target_tokens: profiled_env_usize(p, "TARGET_TOKENS", DEFAULT_TARGET_TOKENS),
            max_tokens: profiled_env_usize(p, "MAX_TOKENS", DEFAULT_MAX_TOKENS),
            min_tokens: profiled_env_usize(p, "MIN_TOKENS", DEFAULT_MIN_TOKENS),
            embedding_prefix: profiled_env_raw(p, "EMBEDDING_PREFIX")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_PREFIX.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), FolioError> {
        if self.target_tokens == 0 {
            return Err(FolioError::InvalidConfig(
                "target_tokens must be greater than zero".into(),
            ));
        }
        if self.min_tokens > self.target_tokens {
            return Err(FolioError::InvalidConfig(format!(
                "min_tokens ({}) exceeds target_tokens ({})",
                self.min_tokens, self.target_tokens
            )));
        }
        if self.target_tokens > self.max_tokens {
            return Err(FolioError::InvalidConfig(format!(
                "target_tokens ({}) exceeds max_tokens ({})",
                self.target_tokens, self.max_tokens
            )));
        }
        Ok(())
    }
}

// ── Paths ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory of cleaned `.txt` documents.
    pub input_dir: PathBuf,
    /// Directory receiving `{stem}_chunks.json` and `_all_chunks.json`.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("cleaned"),
            output_dir: PathBuf::from("chunks"),
        }
    }
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            input_dir: PathBuf::from(profiled_env_or(p, "INPUT_DIR", "cleaned")),
            output_dir: PathBuf::from(profiled_env_or(p, "OUTPUT_DIR", "chunks")),
        }
    }
}

// ── Runtime ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Worker threads for batch chunking (0 = one per core).
    pub threads: usize,
}

impl RuntimeConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            threads: profiled_env_usize(p, "CHUNK_THREADS", 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_budgets() {
        let c = ChunkingConfig::default();
        assert_eq!(c.target_tokens, 400);
        assert_eq!(c.max_tokens, 600);
        assert_eq!(c.min_tokens, 80);
        assert_eq!(c.embedding_prefix, "passage: ");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_budgets() {
        let c = ChunkingConfig {
            target_tokens: 700,
            ..ChunkingConfig::default()
        };
        assert!(matches!(c.validate(), Err(FolioError::InvalidConfig(_))));

        let c = ChunkingConfig {
            min_tokens: 500,
            ..ChunkingConfig::default()
        };
        assert!(matches!(c.validate(), Err(FolioError::InvalidConfig(_))));

        let c = ChunkingConfig {
            target_tokens: 0,
            min_tokens: 0,
            ..ChunkingConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn profile_overrides_unprefixed_key() {
        // Unique profile name so parallel tests never observe these vars.
        env::set_var("FOLIOTESTPROF_TARGET_TOKENS", "250");
        env::set_var("FOLIOTESTPROF_CHUNK_THREADS", "3");
        let cfg = Config::for_profile("folioTestProf");
        assert_eq!(cfg.profile, "FOLIOTESTPROF");
        assert_eq!(cfg.chunking.target_tokens, 250);
        assert_eq!(cfg.runtime.threads, 3);
        env::remove_var("FOLIOTESTPROF_TARGET_TOKENS");
        env::remove_var("FOLIOTESTPROF_CHUNK_THREADS");
    }

    #[test]
    fn profile_label_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.profile_label(), "default");
    }
}

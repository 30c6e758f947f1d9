//! Directory-level chunking: every cleaned `.txt` in, one JSON file per work
//! plus a combined file out.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use folio_core::{Chunk, Config, FolioError};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info};

use crate::document::chunker::{chunk_document, ChunkedDocument};
use crate::document::tokenizer::TokenCounter;
use crate::document::{DocumentError, SourceDocument};

/// Name of the file holding every chunk of a run, in filename order.
pub const COMBINED_FILE: &str = "_all_chunks.json";
/// Number of concepts listed in [`BatchReport::top_concepts`].
pub const TOP_CONCEPTS: usize = 15;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub source_file: String,
    pub work_title: String,
    pub marker_count: usize,
    pub chunk_count: usize,
    pub average_tokens: f64,
    pub chunks_with_concepts: usize,
    pub chunks_with_chapter: usize,
}

impl From<&ChunkedDocument> for DocumentSummary {
    fn from(doc: &ChunkedDocument) -> Self {
        Self {
            source_file: doc.source_file.clone(),
            work_title: doc.metadata.title.clone(),
            marker_count: doc.marker_count,
            chunk_count: doc.chunks.len(),
            average_tokens: doc.average_tokens(),
            chunks_with_concepts: doc.chunks_with_concepts(),
            chunks_with_chapter: doc.chunks_with_chapter(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub source_file: String,
    pub error: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentSummary>,
    pub failures: Vec<DocumentFailure>,
    pub total_chunks: usize,
    /// Most frequent concept tags across all chunks, count descending.
    pub top_concepts: Vec<(String, usize)>,
    pub combined_file: PathBuf,
}

/// Cleaned `.txt` files directly inside `input_dir`, sorted by path.
pub fn discover_sources(input_dir: &Path) -> Result<Vec<PathBuf>, FolioError> {
    if !input_dir.is_dir() {
        return Err(FolioError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input directory {} does not exist", input_dir.display()),
        )));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

/// Chunk every source in `input_dir` and write the results to `output_dir`.
///
/// A document that cannot be read or written is logged and reported in
/// [`BatchReport::failures`]; the rest of the batch still runs. Only problems
/// with the run itself (missing input dir, output dir not writable, thread
/// pool) are returned as errors.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    config: &Config,
    tokenizer: &dyn TokenCounter,
) -> Result<BatchReport, FolioError> {
    let sources = discover_sources(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.runtime.threads)
        .build()
        .map_err(|e| FolioError::Other(format!("failed to build thread pool: {e}")))?;

    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        files = sources.len(),
        threads = pool.current_num_threads(),
        "chunking sources"
    );
    let start = Instant::now();

    // Collecting from an indexed parallel iterator keeps input order.
    let results: Vec<(String, Result<ChunkedDocument, DocumentError>)> = pool.install(|| {
        sources
            .par_iter()
            .map(|path| (display_name(path), chunk_one(path, output_dir, config, tokenizer)))
            .collect()
    });

    let mut documents = Vec::new();
    let mut failures = Vec::new();
    let mut all_chunks: Vec<&Chunk> = Vec::new();
    for (source_file, result) in &results {
        match result {
            Ok(doc) => {
                documents.push(DocumentSummary::from(doc));
                all_chunks.extend(doc.chunks.iter());
            }
            Err(e) => {
                error!(source = %source_file, error = %e, "failed to chunk document");
                failures.push(DocumentFailure {
                    source_file: source_file.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let combined_file = output_dir.join(COMBINED_FILE);
    write_json(&combined_file, &all_chunks)?;

    let report = BatchReport {
        total_chunks: all_chunks.len(),
        top_concepts: top_concepts(all_chunks.iter().copied(), TOP_CONCEPTS),
        documents,
        failures,
        combined_file,
    };

    info!(
        documents = report.documents.len(),
        failed = report.failures.len(),
        chunks = report.total_chunks,
        elapsed_s = start.elapsed().as_secs_f64(),
        "batch complete"
    );
    Ok(report)
}

fn chunk_one(
    path: &Path,
    output_dir: &Path,
    config: &Config,
    tokenizer: &dyn TokenCounter,
) -> Result<ChunkedDocument, DocumentError> {
    let doc = SourceDocument::load(path)?;
    let chunked = chunk_document(&doc, &config.chunking, tokenizer);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.filename.clone());
    write_json(&output_dir.join(format!("{stem}_chunks.json")), &chunked.chunks)?;

    info!(
        source = %doc.filename,
        chunks = chunked.chunks.len(),
        markers = chunked.marker_count,
        avg_tokens = chunked.average_tokens(),
        with_concepts = chunked.chunks_with_concepts(),
        with_chapter = chunked.chunks_with_chapter(),
        "chunked document"
    );
    Ok(chunked)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Concept frequencies, count descending then key ascending, capped at `limit`.
pub fn top_concepts<'a>(chunks: impl IntoIterator<Item = &'a Chunk>, limit: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for chunk in chunks {
        for concept in &chunk.concepts {
            *counts.entry(concept.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

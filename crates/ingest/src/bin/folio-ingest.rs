//! folio-ingest: chunk cleaned texts into linked, concept-tagged passages.
//!
//! ```text
//! folio-ingest chunk    [--input DIR] [--output DIR] [--threads N] [--whitespace-tokens]
//! folio-ingest evaluate [--input DIR]
//! ```
//!
//! Defaults come from the environment (`.env` honoured, `FOLIO_PROFILE`
//! selects a profile); flags override them.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use folio_core::config::load_dotenv;
use folio_core::Config;
use folio_ingest::quality::evaluate_dir;
use folio_ingest::{run_batch, BatchReport, Cl100kTokenizer, TokenCounter, WhitespaceTokenizer};

// ── CLI ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio-ingest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chunk every `.txt` in the input directory.
    Chunk {
        /// Directory of cleaned text files.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory receiving chunk JSON files.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = one per core).
        #[arg(long)]
        threads: Option<usize>,

        /// Count tokens by whitespace instead of cl100k_base.
        #[arg(long)]
        whitespace_tokens: bool,
    },
    /// Score cleaned text files before chunking.
    Evaluate {
        /// Directory of cleaned text files.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command {
        Command::Chunk {
            input,
            output,
            threads,
            whitespace_tokens,
        } => {
            if let Some(input) = input {
                config.paths.input_dir = input;
            }
            if let Some(output) = output {
                config.paths.output_dir = output;
            }
            if let Some(threads) = threads {
                config.runtime.threads = threads;
            }
            config.validate().context("invalid chunking configuration")?;
            config.log_summary();

            let tokenizer: Box<dyn TokenCounter> = if whitespace_tokens {
                info!("counting tokens by whitespace");
                Box::new(WhitespaceTokenizer)
            } else {
                Box::new(Cl100kTokenizer::load().context("failed to load cl100k_base tokenizer")?)
            };

            let report = run_batch(
                &config.paths.input_dir,
                &config.paths.output_dir,
                &config,
                tokenizer.as_ref(),
            )
            .with_context(|| format!("chunking {} failed", config.paths.input_dir.display()))?;
            print_batch_report(&report);
        }
        Command::Evaluate { input } => {
            let dir = input.unwrap_or(config.paths.input_dir);
            let reports = evaluate_dir(&dir).with_context(|| format!("evaluating {} failed", dir.display()))?;
            if reports.is_empty() {
                println!("No files found in {}", dir.display());
                return Ok(());
            }

            println!("\n{:<62} {:>10} {:>7} {:>6} {:>6}", "File", "Chars", "Lines", "Paras", "Score");
            println!("{}", "=".repeat(95));
            for r in &reports {
                println!(
                    "{:<62} {:>10} {:>7} {:>6} {:>6}",
                    r.name, r.chars, r.lines, r.paragraphs, r.score
                );
                if !r.issues.is_empty() {
                    let issues: Vec<String> = r.issues.iter().map(ToString::to_string).collect();
                    println!("    Issues: {}", issues.join(", "));
                }
            }

            let good = reports.iter().filter(|r| r.is_good()).count();
            let total_chars: usize = reports.iter().map(|r| r.chars).sum();
            let avg = reports.iter().map(|r| r.score as f64).sum::<f64>() / reports.len() as f64;
            println!("{}", "=".repeat(95));
            println!(
                "Total: {} files, {} chars, {} good (>=70), avg score: {:.1}",
                reports.len(),
                total_chars,
                good,
                avg
            );
        }
    }

    Ok(())
}

fn print_batch_report(report: &BatchReport) {
    println!("\n{:<50} {:>7} {:>8} {:>9} {:>8}", "Work", "Chunks", "Avg tok", "Concepts", "Chapter");
    println!("{}", "=".repeat(86));
    for doc in &report.documents {
        let title: String = doc.work_title.chars().take(50).collect();
        println!(
            "{:<50} {:>7} {:>8.0} {:>9} {:>8}",
            title, doc.chunk_count, doc.average_tokens, doc.chunks_with_concepts, doc.chunks_with_chapter
        );
    }
    for failure in &report.failures {
        println!("FAILED {}: {}", failure.source_file, failure.error);
    }
    println!("{}", "=".repeat(86));
    println!(
        "Total: {} chunks -> {}",
        report.total_chunks,
        report.combined_file.display()
    );

    if !report.top_concepts.is_empty() {
        println!("\nTop concepts detected:");
        for (concept, count) in &report.top_concepts {
            println!("  {concept}: {count}");
        }
    }
}

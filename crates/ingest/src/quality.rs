//! Heuristic quality scoring for cleaned source texts.
//!
//! Read-only: scores how well a text will chunk (paragraph structure, leftover
//! front matter, page numbers) so bad extractions can be found before a run.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use folio_core::FolioError;
use regex::Regex;
use serde::Serialize;
use tracing::{error, info};

use crate::batch::discover_sources;
use crate::document::{DocumentError, SourceDocument};

const NAME_WIDTH: usize = 60;
const FRONT_MATTER_WINDOW: usize = 2000;
const FRONT_MATTER_KEYWORDS: &[&str] = &["copyright", "isbn", "all rights reserved", "library of congress"];

static TOC_LINES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^\s*[IVXLCDM]+\.\s*\d+\s*$",
        r"(?i)^\s*Chapter\s+\d+\s*\.+\s*\d+\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hardcoded regex pattern is valid"))
    .collect()
});
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,4}$").expect("hardcoded regex pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityIssue {
    Empty,
    SingleLine,
    LongParagraphs { average: usize },
    ShortParagraphs { average: usize },
    NoParagraphs,
    TocRemnants { lines: usize },
    PageNumbers { lines: usize },
    FrontMatter,
    LowProseRatio { percent: usize },
}

impl QualityIssue {
    /// Points deducted from the 100-point score.
    pub fn penalty(&self) -> u32 {
        match self {
            QualityIssue::Empty => 100,
            QualityIssue::SingleLine => 50,
            QualityIssue::LongParagraphs { .. } => 20,
            QualityIssue::ShortParagraphs { .. } => 10,
            QualityIssue::NoParagraphs => 30,
            QualityIssue::TocRemnants { .. } => 10,
            QualityIssue::PageNumbers { .. } => 5,
            QualityIssue::FrontMatter => 5,
            QualityIssue::LowProseRatio { .. } => 15,
        }
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityIssue::Empty => write!(f, "EMPTY FILE"),
            QualityIssue::SingleLine => write!(f, "SINGLE LINE (no paragraphs)"),
            QualityIssue::LongParagraphs { average } => {
                write!(f, "Paragraphs too long (avg {average} chars)")
            }
            QualityIssue::ShortParagraphs { average } => {
                write!(f, "Paragraphs too short (avg {average} chars)")
            }
            QualityIssue::NoParagraphs => write!(f, "No paragraphs detected"),
            QualityIssue::TocRemnants { lines } => write!(f, "TOC remnants ({lines} lines)"),
            QualityIssue::PageNumbers { lines } => write!(f, "Page numbers ({lines})"),
            QualityIssue::FrontMatter => write!(f, "Front matter remnants"),
            QualityIssue::LowProseRatio { percent } => write!(f, "Low prose ratio ({percent}%)"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub name: String,
    pub chars: usize,
    /// Non-blank lines.
    pub lines: usize,
    pub paragraphs: usize,
    pub average_paragraph_len: usize,
    pub issues: Vec<QualityIssue>,
    /// 0 to 100.
    pub score: u32,
}

impl QualityReport {
    pub fn is_good(&self) -> bool {
        self.score >= 70
    }
}

/// Score one cleaned text. Lengths are in characters.
pub fn evaluate_text(name: &str, text: &str) -> QualityReport {
    let name: String = name.chars().take(NAME_WIDTH).collect();

    if text.trim().is_empty() {
        return QualityReport {
            name,
            chars: 0,
            lines: 0,
            paragraphs: 0,
            average_paragraph_len: 0,
            issues: vec![QualityIssue::Empty],
            score: 0,
        };
    }

    let chars = text.chars().count();
    let lines: Vec<&str> = text.split('\n').collect();
    let non_blank: Vec<&str> = lines.iter().copied().filter(|l| !l.trim().is_empty()).collect();
    let paragraphs: Vec<&str> = text.split("\n\n").filter(|p| !p.trim().is_empty()).collect();

    let mut issues = Vec::new();

    if non_blank.len() == 1 && chars > 1000 {
        issues.push(QualityIssue::SingleLine);
    }

    let average_paragraph_len = if paragraphs.is_empty() {
        issues.push(QualityIssue::NoParagraphs);
        0
    } else {
        let total: usize = paragraphs.iter().map(|p| p.chars().count()).sum();
        let average = total / paragraphs.len();
        if average > 5000 {
            issues.push(QualityIssue::LongParagraphs { average });
        } else if average < 50 {
            issues.push(QualityIssue::ShortParagraphs { average });
        }
        average
    };

    let toc = lines
        .iter()
        .filter(|l| TOC_LINES.iter().any(|re| re.is_match(l)))
        .count();
    if toc > 5 {
        issues.push(QualityIssue::TocRemnants { lines: toc });
    }

    let page_numbers = lines.iter().filter(|l| PAGE_NUMBER.is_match(l.trim())).count();
    if page_numbers > 20 {
        issues.push(QualityIssue::PageNumbers { lines: page_numbers });
    }

    let head: String = text.chars().take(FRONT_MATTER_WINDOW).collect::<String>().to_lowercase();
    if FRONT_MATTER_KEYWORDS.iter().any(|k| head.contains(k)) {
        issues.push(QualityIssue::FrontMatter);
    }

    let prose = non_blank
        .iter()
        .filter(|l| l.chars().count() > 60 && l.contains(['.', '!', '?']))
        .count();
    if prose * 10 < non_blank.len() * 3 {
        issues.push(QualityIssue::LowProseRatio {
            percent: prose * 100 / non_blank.len(),
        });
    }

    let penalty: u32 = issues.iter().map(QualityIssue::penalty).sum();
    QualityReport {
        name,
        chars,
        lines: non_blank.len(),
        paragraphs: paragraphs.len(),
        average_paragraph_len,
        issues,
        score: 100u32.saturating_sub(penalty),
    }
}

pub fn evaluate_file(path: &Path) -> Result<QualityReport, DocumentError> {
    let doc = SourceDocument::load(path)?;
    Ok(evaluate_text(&doc.filename, &doc.text))
}

/// Score every `.txt` in `dir`, best first. Unreadable files are logged and
/// left out.
pub fn evaluate_dir(dir: &Path) -> Result<Vec<QualityReport>, FolioError> {
    let mut reports: Vec<QualityReport> = discover_sources(dir)?
        .iter()
        .filter_map(|path| match evaluate_file(path) {
            Ok(report) => Some(report),
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to evaluate file");
                None
            }
        })
        .collect();
    reports.sort_by(|a, b| b.score.cmp(&a.score));

    let good = reports.iter().filter(|r| r.is_good()).count();
    info!(dir = %dir.display(), files = reports.len(), good, "evaluated sources");
    Ok(reports)
}

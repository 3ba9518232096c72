//! Archive analysis: directory walk, per-page records, CSV report, summary.
//!
//! The CSV artifact is the hand-correction surface: a review pass can edit
//! the `classification` column and feed the file back into index rebuilding.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use walkdir::WalkDir;

use crate::classify::{Classification, Classifier, Label};
use crate::{from_path, Error};

/// Column order of the analysis CSV.
pub const CSV_HEADER: &str =
    "filename,year,title,classification,confidence,reasons,text_length,filepath";

/// How many review candidates the summary lists before eliding.
const REVIEW_LIST_LIMIT: usize = 10;

/// Per-page analysis outcome: a classification, or the explicit error
/// outcome for files the walker could not read.
#[derive(Debug, Clone)]
pub enum Outcome {
    Classified(Classification),
    Failed(String),
}

impl Outcome {
    /// Label column value (`"Error"` for failures).
    pub fn label_str(&self) -> &str {
        match self {
            Outcome::Classified(c) => c.label.as_str(),
            Outcome::Failed(_) => "Error",
        }
    }

    /// Confidence column value (0 for failures).
    pub fn confidence(&self) -> u8 {
        match self {
            Outcome::Classified(c) => c.confidence,
            Outcome::Failed(_) => 0,
        }
    }

    /// Reasons column value.
    pub fn reasons_str(&self) -> String {
        match self {
            Outcome::Classified(c) => c.reasons_joined(),
            Outcome::Failed(msg) => format!("Error reading file: {}", msg),
        }
    }

    /// Parsed label, `None` for failures.
    pub fn label(&self) -> Option<Label> {
        match self {
            Outcome::Classified(c) => Some(c.label),
            Outcome::Failed(_) => None,
        }
    }
}

/// One analyzed page, one CSV row.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub filename: String,
    pub year: u16,
    pub title: String,
    pub outcome: Outcome,
    pub text_length: usize,
    pub path: String,
}

/// A raw row read back from an analysis CSV, possibly hand-edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub filename: String,
    pub year: u16,
    pub title: String,
    pub classification: String,
    pub confidence: u8,
    pub reasons: String,
    pub text_length: usize,
    pub filepath: String,
}

impl CsvRow {
    /// Parsed label, `None` for `"Error"` or unknown values.
    pub fn label(&self) -> Option<Label> {
        Label::from_str(&self.classification)
    }
}

/// Collect the archive's HTML pages: `root/<year>/*.html` where `<year>` is
/// a 4-digit directory name. Sorted by path.
pub fn find_archive_pages(root: &Path) -> Vec<(PathBuf, u16)> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let Some(year) = crate::index::year_from_path(path) else {
            continue;
        };
        pages.push((path.to_path_buf(), year));
    }

    pages
}

/// Analyze one page: load, classify, record. Read failures become the
/// `Failed` outcome instead of aborting the batch.
pub fn analyze_page(classifier: &Classifier, path: &Path, year: u16) -> PageRecord {
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let path_str = path.to_string_lossy().replace('\\', "/");

    match from_path(path) {
        Ok(page) => {
            let text_length = page.text.chars().count();
            let classification = classifier.classify(&page);
            PageRecord {
                filename,
                year,
                title: page.title,
                outcome: Outcome::Classified(classification),
                text_length,
                path: path_str,
            }
        }
        Err(e) => {
            tracing::warn!("failed to read {}: {}", path.display(), e);
            PageRecord {
                filename,
                year,
                title: "ERROR".to_string(),
                outcome: Outcome::Failed(e.to_string()),
                text_length: 0,
                path: path_str,
            }
        }
    }
}

/// Default artifact name, timestamped like `story_analysis_20240101_120000.csv`.
pub fn default_csv_name() -> String {
    Local::now()
        .format("story_analysis_%Y%m%d_%H%M%S.csv")
        .to_string()
}

/// Render records as CSV, header included.
pub fn records_to_csv(records: &[PageRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in records {
        let fields = [
            r.filename.clone(),
            r.year.to_string(),
            r.title.clone(),
            r.outcome.label_str().to_string(),
            r.outcome.confidence().to_string(),
            r.outcome.reasons_str(),
            r.text_length.to_string(),
            r.path.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Write the analysis CSV.
pub fn write_csv(path: &Path, records: &[PageRecord]) -> Result<(), Error> {
    fs::write(path, records_to_csv(records))?;
    Ok(())
}

/// Read an analysis CSV back.
pub fn read_csv(path: &Path) -> Result<Vec<CsvRow>, Error> {
    parse_csv(&fs::read_to_string(path)?)
}

/// Parse CSV content with the analysis columns.
pub fn parse_csv(content: &str) -> Result<Vec<CsvRow>, Error> {
    let mut records = Vec::new();

    for (line_no, fields) in parse_csv_records(content).into_iter().enumerate() {
        if line_no == 0 {
            // Header row
            continue;
        }
        if fields.len() != 8 {
            return Err(Error::Csv(format!(
                "row {}: expected 8 fields, got {}",
                line_no + 1,
                fields.len()
            )));
        }
        records.push(CsvRow {
            filename: fields[0].clone(),
            year: parse_field(&fields, 1, "year", line_no)?,
            title: fields[2].clone(),
            classification: fields[3].clone(),
            confidence: parse_field(&fields, 4, "confidence", line_no)?,
            reasons: fields[5].clone(),
            text_length: parse_field(&fields, 6, "text_length", line_no)?,
            filepath: fields[7].clone(),
        });
    }

    Ok(records)
}

/// Parse a numeric CSV field into its target type; out-of-range values are
/// malformed, not truncated.
fn parse_field<T: std::str::FromStr>(
    fields: &[String],
    idx: usize,
    name: &str,
    line_no: usize,
) -> Result<T, Error> {
    fields[idx].parse().map_err(|_| {
        Error::Csv(format!(
            "row {}: bad {}: {:?}",
            line_no + 1,
            name,
            fields[idx]
        ))
    })
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split CSV content into records of fields, honoring quoted fields.
fn parse_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    records
}

/// Per-year label counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct YearCounts {
    pub total: usize,
    pub stories: usize,
    pub documents: usize,
    pub needs_review: usize,
}

/// Aggregated statistics over an analysis run.
#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub stories: usize,
    pub documents: usize,
    pub needs_review: usize,
    pub errors: usize,
    pub by_year: BTreeMap<u16, YearCounts>,
    pub high_confidence_stories: usize,
    pub high_confidence_documents: usize,
    /// (filename, year, reasons) of pages to look at by hand:
    /// NeedsReview, or confidence below 60.
    pub review_files: Vec<(String, u16, String)>,
}

impl Summary {
    pub fn from_records(records: &[PageRecord]) -> Self {
        let mut summary = Summary {
            total: records.len(),
            ..Summary::default()
        };

        for record in records {
            let year = summary.by_year.entry(record.year).or_default();
            year.total += 1;

            match record.outcome.label() {
                Some(Label::Story) => {
                    summary.stories += 1;
                    year.stories += 1;
                    if record.outcome.confidence() >= 80 {
                        summary.high_confidence_stories += 1;
                    }
                }
                Some(Label::Document) => {
                    summary.documents += 1;
                    year.documents += 1;
                    if record.outcome.confidence() >= 80 {
                        summary.high_confidence_documents += 1;
                    }
                }
                Some(Label::NeedsReview) => {
                    summary.needs_review += 1;
                    year.needs_review += 1;
                }
                None => summary.errors += 1,
            }

            // Failed outcomes carry confidence 0, so unreadable files are
            // always listed for a hand pass.
            let needs_look = matches!(record.outcome.label(), Some(Label::NeedsReview))
                || record.outcome.confidence() < 60;
            if needs_look {
                summary.review_files.push((
                    record.filename.clone(),
                    record.year,
                    record.outcome.reasons_str(),
                ));
            }
        }

        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ANALYSIS SUMMARY ===")?;
        writeln!(f, "Total files analyzed: {}", self.total)?;
        writeln!(f, "Stories: {}", self.stories)?;
        writeln!(f, "Documents: {}", self.documents)?;
        writeln!(f, "Needs Review: {}", self.needs_review)?;
        writeln!(f, "Errors: {}", self.errors)?;

        writeln!(f, "\n=== BY YEAR ===")?;
        for (year, counts) in &self.by_year {
            writeln!(
                f,
                "{}: {} total ({} stories, {} documents, {} review)",
                year, counts.total, counts.stories, counts.documents, counts.needs_review
            )?;
        }

        writeln!(f, "\n=== CONFIDENCE LEVELS ===")?;
        writeln!(
            f,
            "High confidence stories (>=80%): {}",
            self.high_confidence_stories
        )?;
        writeln!(
            f,
            "High confidence documents (>=80%): {}",
            self.high_confidence_documents
        )?;

        if !self.review_files.is_empty() {
            writeln!(f, "\n=== FILES NEEDING MANUAL REVIEW ===")?;
            for (filename, year, reasons) in self.review_files.iter().take(REVIEW_LIST_LIMIT) {
                writeln!(f, "  {} ({}) - {}", filename, year, reasons)?;
            }
            if self.review_files.len() > REVIEW_LIST_LIMIT {
                writeln!(
                    f,
                    "  ... and {} more",
                    self.review_files.len() - REVIEW_LIST_LIMIT
                )?;
            }
        }

        Ok(())
    }
}

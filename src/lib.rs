//! Kathalu - Telugu story archive classifier
//!
//! Maintenance tooling for a personal story website: classifies archived
//! HTML pages as stories or documents and regenerates the JSON index the
//! static site reads.
//!
//! # Architecture
//!
//! The pipeline has three layers:
//! 1. Extraction - strip an archived HTML page down to plain text and a title
//! 2. Classification - keyword heuristics score the page as story vs document
//! 3. Artifacts - a CSV analysis report and the `stories-data.json` site index
//!
//! # Example
//!
//! ```no_run
//! use kathalu::{classify::Classifier, from_path};
//!
//! let page = from_path("stories/2023/amma-katha.html").unwrap();
//! let classifier = Classifier::new();
//! let result = classifier.classify(&page);
//!
//! println!("Label: {}", result.label);
//! println!("Confidence: {}%", result.confidence);
//! for reason in &result.reasons {
//!     println!("  - {}", reason);
//! }
//! ```

use std::fs;
use std::path::Path;

pub use error::Error;

// Keyword-based story/document classification
pub mod classify;

// Plain text and title extraction from archived HTML
pub mod extract;

// Site index (stories-data.json) generation
pub mod index;

// Archive analysis: directory walk, CSV report, summary
pub mod report;

mod error {
    use std::fmt;

    #[derive(Debug)]
    pub enum Error {
        Io(std::io::Error),
        Json(serde_json::Error),
        Csv(String),
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Error::Io(e) => write!(f, "IO error: {}", e),
                Error::Json(e) => write!(f, "JSON error: {}", e),
                Error::Csv(e) => write!(f, "CSV error: {}", e),
            }
        }
    }

    impl std::error::Error for Error {}

    impl From<std::io::Error> for Error {
        fn from(e: std::io::Error) -> Self {
            Error::Io(e)
        }
    }

    impl From<serde_json::Error> for Error {
        fn from(e: serde_json::Error) -> Self {
            Error::Json(e)
        }
    }
}

/// Classifier input for a single archived page.
#[derive(Debug, Clone)]
pub struct PageInfo {
    /// Visible text content, markup already stripped
    pub text: String,
    /// Page title, empty when the page has none
    pub title: String,
    /// Base filename including extension
    pub filename: String,
}

impl PageInfo {
    /// Construct directly from already-extracted parts.
    pub fn new(
        text: impl Into<String>,
        title: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            filename: filename.into(),
        }
    }
}

/// Build page info from raw HTML.
///
/// Falls back to the filename stem (with `-` turned into spaces) when the
/// page carries no title element or heading.
pub fn from_html(html: &str, filename: &str) -> PageInfo {
    let text = extract::text(html);
    let title = extract::title(html).unwrap_or_else(|| title_from_filename(filename));

    PageInfo {
        text,
        title,
        filename: filename.to_string(),
    }
}

/// Read an HTML file and build page info from it.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PageInfo, Error> {
    let path = path.as_ref();
    let html = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(from_html(&html, &filename))
}

fn title_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".html").unwrap_or(filename);
    stem.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_uses_title_tag() {
        let page = from_html(
            "<html><title>కథ ఒకటి</title><body>text</body></html>",
            "a.html",
        );
        assert_eq!(page.title, "కథ ఒకటి");
        assert_eq!(page.filename, "a.html");
    }

    #[test]
    fn test_from_html_falls_back_to_filename() {
        let page = from_html("<html><body>no title here</body></html>", "amma-katha.html");
        assert_eq!(page.title, "amma katha");
    }

    #[test]
    fn test_title_from_filename_strips_extension() {
        assert_eq!(title_from_filename("oka-roju.html"), "oka roju");
        assert_eq!(title_from_filename("plain"), "plain");
    }
}

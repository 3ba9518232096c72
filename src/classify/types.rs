//! Core types for the classification system.

use std::fmt;

use serde::Serialize;

/// The classification label assigned to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    Story,
    Document,
    NeedsReview,
}

impl Label {
    /// Get the string representation used in report and index artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Story => "Story",
            Label::Document => "Document",
            Label::NeedsReview => "Needs Review",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "story" => Some(Label::Story),
            "document" => Some(Label::Document),
            "needs review" => Some(Label::NeedsReview),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The assigned label.
    pub label: Label,
    /// Heuristic certainty (0 to 100), not a calibrated probability.
    pub confidence: u8,
    /// Human-readable reasons, at most the configured maximum.
    pub reasons: Vec<String>,
}

impl Classification {
    /// Create a new classification result.
    pub fn new(label: Label, confidence: u8, reasons: Vec<String>) -> Self {
        Self {
            label,
            confidence,
            reasons,
        }
    }

    /// Reasons joined with `"; "` for tabular output.
    pub fn reasons_joined(&self) -> String {
        self.reasons.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_as_str() {
        assert_eq!(Label::Story.as_str(), "Story");
        assert_eq!(Label::Document.as_str(), "Document");
        assert_eq!(Label::NeedsReview.as_str(), "Needs Review");
    }

    #[test]
    fn test_label_from_str() {
        assert_eq!(Label::from_str("Story"), Some(Label::Story));
        assert_eq!(Label::from_str("STORY"), Some(Label::Story));
        assert_eq!(Label::from_str("needs review"), Some(Label::NeedsReview));
        assert_eq!(Label::from_str("unknown"), None);
    }

    #[test]
    fn test_label_round_trip() {
        for label in [Label::Story, Label::Document, Label::NeedsReview] {
            assert_eq!(Label::from_str(label.as_str()), Some(label));
        }
    }

    #[test]
    fn test_reasons_joined() {
        let c = Classification::new(
            Label::Document,
            80,
            vec!["Contains 'invoice'".to_string(), "Contains 'tax'".to_string()],
        );
        assert_eq!(c.reasons_joined(), "Contains 'invoice'; Contains 'tax'");
    }
}

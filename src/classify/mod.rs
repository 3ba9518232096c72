//! Keyword-heuristic story/document classification.
//!
//! The classifier scores a page twice: a document score from English
//! bill/form/record terms in the lower-cased text, title, and filename, and
//! a story score from Telugu narrative terms in the original-case text plus
//! length and structure bonuses. Thresholds decide the label; the loser's
//! reasons are discarded.
//!
//! # Example
//!
//! ```
//! use kathalu::classify::{Classifier, Label};
//! use kathalu::PageInfo;
//!
//! let classifier = Classifier::new();
//! let page = PageInfo::new(
//!     "Invoice for broadband charges, total amount due",
//!     "Monthly bill",
//!     "fibernet-bill.html",
//! );
//!
//! let result = classifier.classify(&page);
//! assert_eq!(result.label, Label::Document);
//! ```

pub mod indicators;
mod types;


pub use types::{Classification, Label};

use crate::PageInfo;

/// Reason attached to the short-content fallback.
pub const SHORT_CONTENT_REASON: &str = "Very short content, likely metadata or form";

/// Reason attached to the needs-review fallback.
pub const NEEDS_REVIEW_REASON: &str = "Unclear content type, needs manual review";

/// A single scoring rule: a substring pattern, its weight, and the template
/// used to render the matched reason (`{}` is replaced by the pattern).
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: &'static str,
    pub weight: u32,
    pub reason: &'static str,
}

impl Rule {
    fn new(pattern: &'static str, weight: u32, reason: &'static str) -> Self {
        Self {
            pattern,
            weight,
            reason,
        }
    }

    fn render_reason(&self) -> String {
        self.reason.replacen("{}", self.pattern, 1)
    }
}

/// Scoring configuration: ordered rule lists per category plus the numeric
/// thresholds of the decision logic.
///
/// Document rules match against lower-cased text/title and filename; story
/// rules match against original-case text, since Telugu has no case folding.
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Document terms matched in lower-cased text or title.
    pub document_rules: Vec<Rule>,
    /// Document patterns matched in the lower-cased filename.
    pub filename_rules: Vec<Rule>,
    /// Story terms matched in original-case text.
    pub story_rules: Vec<Rule>,
    /// Minimum document score for a Document label.
    pub document_threshold: u32,
    /// Minimum story score for a Story label.
    pub story_threshold: u32,
    /// Texts shorter than this (chars) fall back to Document.
    pub short_text_limit: usize,
    /// Texts longer than this (chars) earn a story bonus.
    pub substantial_text_limit: usize,
    /// More newlines than this earn the narrative-structure bonus.
    pub line_break_threshold: usize,
    /// More sentence marks than this earn the narrative-structure bonus.
    pub sentence_mark_threshold: usize,
    /// Sentence terminator counted for the structure bonus (Telugu danda).
    pub sentence_mark: char,
    /// Confidence floor for threshold matches.
    pub base_confidence: u32,
    /// Confidence added per score point.
    pub confidence_step: u32,
    /// Confidence ceiling for threshold matches.
    pub confidence_cap: u32,
    /// Confidence of the short-content fallback.
    pub short_confidence: u8,
    /// Confidence of the needs-review fallback.
    pub review_confidence: u8,
    /// Reasons are truncated to this many entries.
    pub max_reasons: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        let document_rules = indicators::DOCUMENT_INDICATORS
            .iter()
            .map(|p| Rule::new(p, 1, "Contains '{}'"))
            .collect();
        let filename_rules = indicators::DOC_FILENAME_PATTERNS
            .iter()
            .map(|p| Rule::new(p, 2, "Filename contains '{}'"))
            .collect();
        let story_rules = indicators::STORY_INDICATORS
            .iter()
            .map(|p| Rule::new(p, 1, "Contains story element '{}'"))
            .collect();

        Self {
            document_rules,
            filename_rules,
            story_rules,
            document_threshold: 2,
            story_threshold: 2,
            short_text_limit: 50,
            substantial_text_limit: 200,
            line_break_threshold: 3,
            sentence_mark_threshold: 2,
            sentence_mark: '।',
            base_confidence: 60,
            confidence_step: 10,
            confidence_cap: 90,
            short_confidence: 70,
            review_confidence: 30,
            max_reasons: 3,
        }
    }
}

/// The story/document classifier.
///
/// Pure and infallible: every input, including empty strings, produces a
/// valid result through one of the fallback branches. Unreadable files are
/// the caller's concern and must be reported as a separate outcome before
/// reaching the classifier.
pub struct Classifier {
    heuristics: Heuristics,
}

impl Classifier {
    /// Create a classifier with the built-in indicator tables.
    pub fn new() -> Self {
        Self {
            heuristics: Heuristics::default(),
        }
    }

    /// Create a classifier with custom rules and thresholds.
    pub fn with_heuristics(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Classify a page.
    pub fn classify(&self, page: &PageInfo) -> Classification {
        let h = &self.heuristics;

        let text_lower = page.text.to_lowercase();
        let title_lower = page.title.to_lowercase();
        let filename_lower = page.filename.to_lowercase();

        let mut document_score = 0u32;
        let mut document_reasons = Vec::new();
        for rule in &h.document_rules {
            if text_lower.contains(rule.pattern) || title_lower.contains(rule.pattern) {
                document_score += rule.weight;
                document_reasons.push(rule.render_reason());
            }
        }
        for rule in &h.filename_rules {
            if filename_lower.contains(rule.pattern) {
                document_score += rule.weight;
                document_reasons.push(rule.render_reason());
            }
        }

        let mut story_score = 0u32;
        let mut story_reasons = Vec::new();
        for rule in &h.story_rules {
            // Original case on purpose: Telugu terms have no case folding
            if page.text.contains(rule.pattern) {
                story_score += rule.weight;
                story_reasons.push(rule.render_reason());
            }
        }

        // Length in chars, matching the code-point semantics Telugu needs
        let text_len = page.text.chars().count();
        if text_len > h.substantial_text_limit {
            story_score += 1;
            story_reasons.push("Substantial content length".to_string());
        }

        let breaks = page.text.matches('\n').count();
        let marks = page.text.matches(h.sentence_mark).count();
        if breaks > h.line_break_threshold || marks > h.sentence_mark_threshold {
            story_score += 1;
            story_reasons.push("Has narrative structure".to_string());
        }

        // First match wins: documents take precedence over stories
        if document_score >= h.document_threshold {
            document_reasons.truncate(h.max_reasons);
            Classification::new(
                Label::Document,
                self.scored_confidence(document_score),
                document_reasons,
            )
        } else if story_score >= h.story_threshold {
            story_reasons.truncate(h.max_reasons);
            Classification::new(
                Label::Story,
                self.scored_confidence(story_score),
                story_reasons,
            )
        } else if text_len < h.short_text_limit {
            Classification::new(
                Label::Document,
                h.short_confidence,
                vec![SHORT_CONTENT_REASON.to_string()],
            )
        } else {
            Classification::new(
                Label::NeedsReview,
                h.review_confidence,
                vec![NEEDS_REVIEW_REASON.to_string()],
            )
        }
    }

    fn scored_confidence(&self, score: u32) -> u8 {
        let h = &self.heuristics;
        h.confidence_cap
            .min(h.base_confidence + score * h.confidence_step) as u8
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str, title: &str, filename: &str) -> Classification {
        Classifier::new().classify(&PageInfo::new(text, title, filename))
    }

    #[test]
    fn test_empty_input_is_short_document() {
        let result = classify("", "", "x.html");
        assert_eq!(result.label, Label::Document);
        assert_eq!(result.confidence, 70);
        assert_eq!(result.reasons, vec![SHORT_CONTENT_REASON.to_string()]);
    }

    #[test]
    fn test_two_document_indicators() {
        let result = classify(
            "Please settle this invoice before the tax deadline.",
            "",
            "x.html",
        );
        assert_eq!(result.label, Label::Document);
        assert_eq!(result.confidence, 80);
        assert_eq!(result.reasons.len(), 2);
        assert!(result.reasons.contains(&"Contains 'invoice'".to_string()));
        assert!(result.reasons.contains(&"Contains 'tax'".to_string()));
    }

    #[test]
    fn test_document_indicator_in_title() {
        let result = classify(
            "some neutral words here and there, nothing else at all today",
            "Rental agreement copy",
            "x.html",
        );
        assert_eq!(result.label, Label::Document);
    }

    #[test]
    fn test_filename_pattern_weighs_double() {
        // A single filename hit alone reaches the document threshold
        let result = classify("short", "", "fibernet-march.html");
        assert_eq!(result.label, Label::Document);
        assert_eq!(result.confidence, 80);
        assert_eq!(
            result.reasons,
            vec!["Filename contains 'fibernet'".to_string()]
        );
    }

    #[test]
    fn test_long_story_confidence_capped_and_reasons_truncated() {
        // >200 chars, two Telugu indicators, >3 newlines: score >= 4
        let text = "ఒకసారి మా ఊరిలో పెద్ద పండుగ జరిగింది అని చెబుతారు.\n".repeat(8);
        let result = classify(&text, "", "katha.html");
        assert_eq!(result.label, Label::Story);
        assert_eq!(result.confidence, 90);
        assert_eq!(result.reasons.len(), 3);
    }

    #[test]
    fn test_ambiguous_text_needs_review() {
        // One document indicator, one story indicator, ~120 chars, no
        // newlines or danda marks: both scores stay below threshold.
        let text = format!(
            "నిన్న మా ఇంటికి invoice పంపారు అని అన్నాడు రాము {}",
            "x".repeat(70)
        );
        assert!(text.chars().count() >= 50);
        assert!(text.chars().count() <= 200);
        let result = classify(&text, "", "x.html");
        assert_eq!(result.label, Label::NeedsReview);
        assert_eq!(result.confidence, 30);
        assert_eq!(result.reasons, vec![NEEDS_REVIEW_REASON.to_string()]);
    }

    #[test]
    fn test_document_precedence_over_story() {
        // Both categories reach their threshold; document wins by order
        let text = "ఒకసారి జరిగింది: invoice and tax and bill totals \
                    spread over enough text to pass the short limit easily";
        let result = classify(text, "", "x.html");
        assert_eq!(result.label, Label::Document);
    }

    #[test]
    fn test_danda_marks_count_as_structure() {
        let text = format!(
            "ఒక రోజు మా అమ్మ చెప్పింది। అది విని నవ్వాను। మళ్ళీ చెప్పింది। {}",
            "pad ".repeat(10)
        );
        let result = classify(&text, "", "x.html");
        assert_eq!(result.label, Label::Story);
        assert!(result
            .reasons
            .contains(&"Has narrative structure".to_string()));
    }

    #[test]
    fn test_repeated_indicator_scores_twice() {
        // "గుర్తుకు వచ్చింది" appears twice in the story table, so it alone
        // reaches the story threshold with two identical reasons.
        let text = format!("గుర్తుకు వచ్చింది {}", "x".repeat(80));
        assert!(text.chars().count() >= 50);
        assert!(text.chars().count() <= 200);
        let result = classify(&text, "", "x.html");
        assert_eq!(result.label, Label::Story);
        assert_eq!(result.confidence, 80);
        assert_eq!(
            result.reasons,
            vec![
                "Contains story element 'గుర్తుకు వచ్చింది'".to_string(),
                "Contains story element 'గుర్తుకు వచ్చింది'".to_string(),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let page = PageInfo::new("ఒకసారి ఒక రోజు జరిగింది", "కథ", "katha.html");
        let classifier = Classifier::new();
        assert_eq!(classifier.classify(&page), classifier.classify(&page));
    }

    #[test]
    fn test_confidence_always_in_bounds() {
        let inputs = [
            ("", "", ""),
            ("invoice tax bill payment amount gst total billing", "bill", "bill-invoice-tax.html"),
            ("ఒకసారి ఒకప్పుడు అనగనగా ఒక రోజు కథ కధ అనుభవం జరిగింది", "", "katha.html"),
            ("plain unremarkable text that matches nothing in particular but is long enough", "", "page.html"),
        ];
        let classifier = Classifier::new();
        for (text, title, filename) in inputs {
            let result = classifier.classify(&PageInfo::new(text, title, filename));
            assert!(result.confidence <= 100);
            assert!(result.reasons.len() <= 3);
            assert!(!result.reasons.is_empty());
        }
    }

    #[test]
    fn test_custom_threshold_is_honored() {
        let heuristics = Heuristics {
            story_threshold: 1,
            ..Heuristics::default()
        };
        let classifier = Classifier::with_heuristics(heuristics);
        let result = classifier.classify(&PageInfo::new(
            "అనగనగా with plenty of padding so the short branch never fires at all",
            "",
            "x.html",
        ));
        assert_eq!(result.label, Label::Story);
    }
}

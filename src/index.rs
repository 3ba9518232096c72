//! Site index generation (`stories-data.json`).
//!
//! Builds the per-story entries the static site consumes: cleaned title,
//! excerpt, word count, year, date, and keyword-derived categories and tags.
//! Only pages classified as Story belong in the index; filtering is the
//! caller's job.

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::{Error, PageInfo};

/// Excerpts are truncated to this many chars.
const EXCERPT_LIMIT: usize = 200;

/// Stories below this word count are tagged `short`, the rest `long`.
const SHORT_STORY_WORDS: usize = 500;

/// Site suffixes stripped from page titles.
const TITLE_SUFFIXES: &[&str] = &[" - రవి కావూరు కథలు", " - రవి గరి కథలు"];

/// Topical categories: (category, tag, keywords matched in lower-cased
/// title + excerpt).
const CATEGORY_RULES: &[(&str, &str, &[&str])] = &[
    (
        "family",
        "family",
        &[
            "అమ్మ", "అప్ప", "తల్లి", "తండ్రి", "కుటుంబ", "family", "mother", "father",
        ],
    ),
    (
        "spiritual",
        "spiritual",
        &[
            "దేవుడు", "భగవంతుడు", "దేవ", "పూజ", "ప్రార్థన", "temple", "spiritual", "prayer",
        ],
    ),
    (
        "travel",
        "travel",
        &[
            "యాత్ర", "ప్రయాణ", "trip", "travel", "journey", "వెళ్ళాం", "వెళ్లాను",
        ],
    ),
    (
        "philosophical",
        "life",
        &[
            "జీవితం", "అర్థం", "తత్వం", "philosophy", "life", "meaning", "విలువ",
        ],
    ),
    (
        "kids",
        "children",
        &[
            "పిల్లవాడు", "పిల్లలు", "చిన్న", "బాలుడు", "child", "kid", "children",
        ],
    ),
];

/// One entry of `stories-data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryEntry {
    pub title: String,
    pub excerpt: String,
    pub word_count: usize,
    pub year: u16,
    pub date: String,
    pub filename: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Build an index entry from a loaded page.
///
/// `year` overrides the year derived from the path; the file's modification
/// year is the last resort. The date field is the file's modification date.
pub fn entry_from_page(
    path: &Path,
    page: &PageInfo,
    year: Option<u16>,
) -> Result<StoryEntry, Error> {
    let modified: DateTime<Local> = fs::metadata(path)?.modified()?.into();

    let year = year
        .or_else(|| year_from_path(path))
        .unwrap_or(modified.year() as u16);

    let mut entry = StoryEntry {
        title: clean_title(&page.title),
        excerpt: excerpt(&page.text),
        word_count: page.text.split_whitespace().count(),
        year,
        date: modified.format("%Y-%m-%d").to_string(),
        filename: path.to_string_lossy().replace('\\', "/"),
        categories: Vec::new(),
        tags: Vec::new(),
    };
    categorize(&mut entry);

    Ok(entry)
}

/// Sort entries the way the site lists them: newest year first, then title.
pub fn sort_entries(entries: &mut [StoryEntry]) {
    entries.sort_by(|a, b| (Reverse(a.year), &a.title).cmp(&(Reverse(b.year), &b.title)));
}

/// Write the index as pretty-printed JSON.
pub fn write_json(path: &Path, entries: &[StoryEntry]) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}

/// Find a 4-digit year among the path components.
pub fn year_from_path(path: &Path) -> Option<u16> {
    path.components().rev().find_map(|c| {
        let name = c.as_os_str().to_str()?;
        if name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()) {
            name.parse().ok()
        } else {
            None
        }
    })
}

fn clean_title(title: &str) -> String {
    let mut title = title.to_string();
    for suffix in TITLE_SUFFIXES {
        title = title.replace(suffix, "");
    }
    title
}

fn excerpt(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(EXCERPT_LIMIT) {
        Some((byte_pos, _)) => format!("{}...", &text[..byte_pos]),
        None => text.to_string(),
    }
}

fn categorize(entry: &mut StoryEntry) {
    let content = format!("{} {}", entry.title, entry.excerpt).to_lowercase();

    for (category, tag, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|k| content.contains(k)) {
            entry.categories.push(category.to_string());
            entry.tags.push(tag.to_string());
        }
    }

    let topical = !entry.categories.is_empty();

    if entry.word_count < SHORT_STORY_WORDS {
        entry.categories.push("short".to_string());
        entry.tags.push("short".to_string());
    } else {
        entry.categories.push("long".to_string());
        entry.tags.push("long".to_string());
    }

    if !topical {
        entry.categories.push("general".to_string());
        entry.tags.push("general".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, excerpt_text: &str, word_count: usize) -> StoryEntry {
        let mut e = StoryEntry {
            title: title.to_string(),
            excerpt: excerpt_text.to_string(),
            word_count,
            year: 2023,
            date: "2023-05-01".to_string(),
            filename: "stories/2023/x.html".to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
        };
        categorize(&mut e);
        e
    }

    #[test]
    fn test_excerpt_truncates_at_limit() {
        let short = "చిన్న పాఠం";
        assert_eq!(excerpt(short), short);

        let long = "అ".repeat(250);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_LIMIT + 3);
    }

    #[test]
    fn test_excerpt_exact_limit_not_truncated() {
        let text = "a".repeat(EXCERPT_LIMIT);
        assert_eq!(excerpt(&text), text);
    }

    #[test]
    fn test_clean_title_strips_site_suffix() {
        assert_eq!(
            clean_title("చెరువు గట్టున - రవి కావూరు కథలు"),
            "చెరువు గట్టున"
        );
        assert_eq!(clean_title("plain title"), "plain title");
    }

    #[test]
    fn test_categorize_family() {
        let e = entry("అమ్మ జ్ఞాపకాలు", "మా అమ్మ గురించి", 300);
        assert!(e.categories.contains(&"family".to_string()));
        assert!(e.tags.contains(&"family".to_string()));
        assert!(e.categories.contains(&"short".to_string()));
        assert!(!e.categories.contains(&"general".to_string()));
    }

    #[test]
    fn test_categorize_philosophical_tag_differs() {
        let e = entry("జీవితం అంటే", "జీవితం గురించి ఆలోచన", 800);
        assert!(e.categories.contains(&"philosophical".to_string()));
        assert!(e.tags.contains(&"life".to_string()));
        assert!(e.categories.contains(&"long".to_string()));
    }

    #[test]
    fn test_categorize_general_fallback() {
        let e = entry("శీర్షిక", "ఏ వర్గానికీ చెందని వచనం", 100);
        assert_eq!(e.categories, vec!["short", "general"]);
        assert_eq!(e.tags, vec!["short", "general"]);
    }

    #[test]
    fn test_sort_entries_year_desc_title_asc() {
        let mut entries = vec![
            entry("b", "", 10),
            entry("a", "", 10),
            {
                let mut e = entry("z", "", 10);
                e.year = 2024;
                e
            },
        ];
        sort_entries(&mut entries);
        let order: Vec<(u16, &str)> = entries.iter().map(|e| (e.year, e.title.as_str())).collect();
        assert_eq!(order, vec![(2024, "z"), (2023, "a"), (2023, "b")]);
    }

    #[test]
    fn test_year_from_path() {
        assert_eq!(year_from_path(Path::new("stories/2022/a.html")), Some(2022));
        assert_eq!(year_from_path(Path::new("stories/misc/a.html")), None);
    }

    #[test]
    fn test_json_field_names() {
        let e = entry("t", "e", 42);
        let value = serde_json::to_value(&e).unwrap();
        assert!(value.get("wordCount").is_some());
        assert!(value.get("word_count").is_none());
        assert_eq!(value["wordCount"], 42);
    }
}

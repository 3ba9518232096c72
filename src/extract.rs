//! Plain text and title extraction from archived HTML.
//!
//! The archive is small, static, self-authored HTML, so extraction is
//! regex-based: drop script/style subtrees and comments, strip the remaining
//! tags, decode entities, and collapse whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").unwrap());

static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1\s*>").unwrap());

static H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<h2[^>]*>(.*?)</h2\s*>").unwrap());

/// Extract the visible text of an HTML page as a single
/// whitespace-collapsed line.
pub fn text(html: &str) -> String {
    let without_scripts = SCRIPT.replace_all(html, " ");
    let without_styles = STYLE.replace_all(&without_scripts, " ");
    let without_comments = COMMENT.replace_all(&without_styles, " ");
    let stripped = TAG.replace_all(&without_comments, " ");
    let decoded = html_escape::decode_html_entities(&stripped);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the page title: `<title>`, else the first `<h1>`, else the first
/// `<h2>`. Returns `None` when all are absent or empty.
pub fn title(html: &str) -> Option<String> {
    for pattern in [&*TITLE, &*H1, &*H2] {
        if let Some(captures) = pattern.captures(html) {
            let inner = TAG.replace_all(&captures[1], " ");
            let decoded = html_escape::decode_html_entities(&inner);
            let cleaned = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

use lazy_static::lazy_static;
use regex::Regex;

use crate::front_matter::types::FrontMatter;

lazy_static! {
    static ref FIRST_HEADING_REGEX: Regex = Regex::new(r"(?m)^#{1,6}\s+(.+)$").unwrap();
}

/// Default separator between the excerpt and the rest of the body
pub const DEFAULT_EXCERPT_SEPARATOR: &str = "\n\n";

/// Fall back to the first Markdown heading when front matter has no title
pub fn extract_title_from_content(content: &str) -> Option<String> {
    FIRST_HEADING_REGEX
        .captures(content)
        .map(|cap| cap[1].trim().to_string())
}

/// Determine the excerpt for a document.
///
/// An explicit `excerpt` in front matter wins; otherwise the body up to the
/// excerpt separator (front matter override or the blank-line default) is
/// used.
pub fn extract_excerpt(content: &str, front_matter: &FrontMatter) -> Option<String> {
    if let Some(excerpt) = &front_matter.excerpt {
        return Some(excerpt.clone());
    }

    let separator = front_matter
        .excerpt_separator
        .as_deref()
        .unwrap_or(DEFAULT_EXCERPT_SEPARATOR);

    let body = content.trim_start();
    if body.is_empty() {
        return None;
    }

    match body.find(separator) {
        Some(pos) => Some(body[..pos].trim().to_string()),
        None => Some(body.trim().to_string()),
    }
}

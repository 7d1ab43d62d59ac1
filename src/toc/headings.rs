use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HEADING_REGEX: Regex = Regex::new(
        r#"<h([1-6])(?:[^>]*?id=["']([^"']+)["'])?[^>]*>(.*?)</h[1-6]>"#
    ).unwrap();

    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// One document heading as produced by the renderer: visible text, nesting
/// depth and the anchor used to link to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub text: String,
    pub depth: u8,
    pub anchor_id: String,
}

impl HeadingRecord {
    pub fn new(text: impl Into<String>, depth: u8, anchor_id: impl Into<String>) -> Self {
        HeadingRecord {
            text: text.into(),
            depth,
            anchor_id: anchor_id.into(),
        }
    }
}

/// Extract the flat, document-ordered heading sequence from rendered HTML.
///
/// Headings keep the `id` the renderer assigned; headings without one get a
/// slug derived from their text. Anchors are kept unique within the document
/// by suffixing repeats with `-1`, `-2` and so on.
pub fn extract_headings(html: &str) -> Vec<HeadingRecord> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headings = Vec::new();

    for cap in HEADING_REGEX.captures_iter(html) {
        // The regex only matches single-digit levels 1-6
        let depth: u8 = cap[1].parse().unwrap_or(0);
        let text = strip_html_tags(&cap[3]);

        let anchor = match cap.get(2) {
            Some(id) => id.as_str().to_string(),
            None => slug::slugify(&text),
        };
        let anchor_id = dedup_anchor(&mut seen, anchor);

        headings.push(HeadingRecord::new(text, depth, anchor_id));
    }

    headings
}

/// Keep anchors unique within one document
fn dedup_anchor(seen: &mut HashMap<String, usize>, anchor: String) -> String {
    match seen.get_mut(&anchor) {
        Some(count) => {
            *count += 1;
            let unique = format!("{}-{}", anchor, count);
            seen.insert(unique.clone(), 0);
            unique
        }
        None => {
            seen.insert(anchor.clone(), 0);
            anchor
        }
    }
}

/// Strip HTML tags from heading text
fn strip_html_tags(text: &str) -> String {
    let stripped = TAG_REGEX.replace_all(text, "");
    html_escape::decode_html_entities(stripped.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headings_with_ids() {
        let html = r#"
            <h2 id="setup">Setup</h2>
            <p>Some text</p>
            <h3 id="requirements">Requirements</h3>
            <h2 id="usage">Usage</h2>
        "#;

        let headings = extract_headings(html);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0], HeadingRecord::new("Setup", 2, "setup"));
        assert_eq!(headings[1], HeadingRecord::new("Requirements", 3, "requirements"));
        assert_eq!(headings[2], HeadingRecord::new("Usage", 2, "usage"));
    }

    #[test]
    fn test_extract_headings_generates_slugs() {
        let html = "<h2>Getting Started</h2>";
        let headings = extract_headings(html);

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].anchor_id, "getting-started");
    }

    #[test]
    fn test_duplicate_anchors_are_suffixed() {
        let html = "<h2>Notes</h2><h2>Notes</h2><h2>Notes</h2>";
        let headings = extract_headings(html);

        assert_eq!(headings[0].anchor_id, "notes");
        assert_eq!(headings[1].anchor_id, "notes-1");
        assert_eq!(headings[2].anchor_id, "notes-2");
    }

    #[test]
    fn test_inline_markup_is_stripped() {
        let html = r#"<h2 id="api">The <code>build</code> API</h2>"#;
        let headings = extract_headings(html);

        assert_eq!(headings[0].text, "The build API");
        assert_eq!(headings[0].anchor_id, "api");
    }

    #[test]
    fn test_heading_order_is_document_order() {
        let html = "<h3>First</h3><h2>Second</h2><h3>Third</h3>";
        let depths: Vec<u8> = extract_headings(html).iter().map(|h| h.depth).collect();

        assert_eq!(depths, vec![3, 2, 3]);
    }
}

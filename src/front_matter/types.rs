use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Front matter for a document, page or layout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrontMatter {
    /// Document title
    pub title: Option<String>,

    /// Custom slug for URL generation
    pub slug: Option<String>,

    /// Layout to use
    pub layout: Option<String>,

    /// Custom permalink, overriding the collection pattern
    pub permalink: Option<String>,

    /// Page description
    pub description: Option<String>,

    /// Date as a string (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    pub date: Option<String>,

    /// Categories
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_seq")]
    pub categories: Option<Vec<String>>,

    /// Tags
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_seq")]
    pub tags: Option<Vec<String>>,

    /// Author name
    pub author: Option<String>,

    /// Whether the content is published
    pub published: Option<bool>,

    /// Whether content is a draft
    #[serde(default)]
    pub draft: Option<bool>,

    /// Custom excerpt
    pub excerpt: Option<String>,

    /// Page-specific excerpt separator
    pub excerpt_separator: Option<String>,

    /// Whether to build a table of contents for this document
    pub toc: Option<bool>,

    /// Custom front matter fields
    #[serde(flatten)]
    pub custom: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Create a new empty front matter
    pub fn new() -> Self {
        FrontMatter::default()
    }

    /// Parse the `date` field, if present and well-formed
    pub fn get_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_value)
    }

    /// Whether the document should appear in normal builds
    pub fn is_published(&self) -> bool {
        self.published.unwrap_or(true)
    }
}

/// Parse a front matter date string.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_date_value(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Deserialize a value that may be either a single string or a sequence of
/// strings into `Option<Vec<String>>`. Front matter authors write both
/// `tags: rust` and `tags: [rust, cli]`.
pub fn deserialize_string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        String(String),
        Seq(Vec<String>),
    }

    let value: Option<StringOrSeq> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrSeq::String(s) => vec![s],
        StringOrSeq::Seq(seq) => seq,
    }))
}

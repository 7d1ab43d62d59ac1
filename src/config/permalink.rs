use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};

use crate::front_matter::FrontMatter;
use crate::utils::path;

/// Named permalink styles and their patterns
pub enum PermalinkStyle {
    /// Date style: /:categories/:year/:month/:day/:title.html
    Date,
    /// Pretty style: /:collection/:title/
    Pretty,
    /// Ordinal style: /:categories/:year/:y_day/:title.html
    Ordinal,
    /// None style: /:categories/:title.html
    None,
    /// Custom pattern
    Custom(String),
}

impl From<&str> for PermalinkStyle {
    fn from(s: &str) -> Self {
        match s {
            "date" => PermalinkStyle::Date,
            "pretty" => PermalinkStyle::Pretty,
            "ordinal" => PermalinkStyle::Ordinal,
            "none" => PermalinkStyle::None,
            _ => PermalinkStyle::Custom(s.to_string()),
        }
    }
}

impl PermalinkStyle {
    /// Get the pattern string for this permalink style
    pub fn pattern(&self) -> String {
        match self {
            PermalinkStyle::Date => "/:categories/:year/:month/:day/:title.html".to_string(),
            PermalinkStyle::Pretty => "/:collection/:title/".to_string(),
            PermalinkStyle::Ordinal => "/:categories/:year/:y_day/:title.html".to_string(),
            PermalinkStyle::None => "/:categories/:title.html".to_string(),
            PermalinkStyle::Custom(pattern) => pattern.clone(),
        }
    }
}

/// Build a document URL from a permalink pattern and front matter.
///
/// A `permalink` in front matter overrides the pattern wholesale. `:title`
/// resolves to the front matter slug, then the slugified title, then the
/// source file stem.
pub fn process_permalink(
    pattern: &str,
    front_matter: &FrontMatter,
    collection: &str,
    source_path: &Path,
) -> String {
    if let Some(permalink) = &front_matter.permalink {
        return normalize_url(permalink);
    }

    let mut result = PermalinkStyle::from(pattern).pattern();
    let mut placeholders = HashMap::<String, String>::new();

    let title_slug = front_matter
        .slug
        .clone()
        .or_else(|| front_matter.title.as_deref().map(slug::slugify))
        .or_else(|| path::get_stem(source_path).map(|s| slug::slugify(strip_date_prefix(&s))))
        .unwrap_or_else(|| "untitled".to_string());
    placeholders.insert("title".to_string(), title_slug.clone());
    placeholders.insert("slug".to_string(), title_slug);

    placeholders.insert("collection".to_string(), collection.to_string());

    if let Some(date) = front_matter.get_date() {
        add_date_placeholders(&mut placeholders, date);
    }

    match &front_matter.categories {
        Some(categories) if !categories.is_empty() => {
            let categories_path = categories
                .iter()
                .map(|c| slug::slugify(c))
                .collect::<Vec<_>>()
                .join("/");
            placeholders.insert("categories".to_string(), categories_path);
        }
        _ => {
            result = result.replace("/:categories", "");
            result = result.replace(":categories/", "");
            result = result.replace(":categories", "");
        }
    }

    for (key, value) in placeholders {
        result = result.replace(&format!(":{}", key), &value);
    }

    normalize_url(&result)
}

/// Strip a `YYYY-MM-DD-` filename prefix so post stems slug cleanly
fn strip_date_prefix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    if bytes.len() > 11
        && bytes[..10]
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
        && bytes[10] == b'-'
    {
        &stem[11..]
    } else {
        stem
    }
}

fn add_date_placeholders(placeholders: &mut HashMap<String, String>, date: DateTime<Utc>) {
    placeholders.insert("year".to_string(), date.year().to_string());
    placeholders.insert("month".to_string(), format!("{:02}", date.month()));
    placeholders.insert("day".to_string(), format!("{:02}", date.day()));
    placeholders.insert("y_day".to_string(), format!("{:03}", date.ordinal()));
}

/// Collapse duplicate slashes and guarantee a leading one
fn normalize_url(url: &str) -> String {
    let mut result = url.to_string();
    while result.contains("//") {
        result = result.replace("//", "/");
    }
    if !result.starts_with('/') {
        result = format!("/{}", result);
    }
    result
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use liquid::model::Value;
use liquid::Object;

use crate::config::{CollectionConfig, Config};
use crate::front_matter::{extract_excerpt, extract_title_from_content, FrontMatter};

/// Document state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Published document
    Published,
    /// Draft document
    Draft,
    /// Document with `published: false` in front matter
    Unpublished,
}

/// A document within a collection
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier (relative path within the source tree)
    pub id: String,

    /// Absolute path to the document file
    pub path: PathBuf,

    /// Path relative to the source directory
    pub relative_path: PathBuf,

    /// URL the document renders at
    pub url: String,

    /// Collection this document belongs to
    pub collection: String,

    /// Date from front matter or the filename
    pub date: Option<DateTime<Utc>>,

    /// Document body without front matter
    pub content: String,

    /// Front matter data
    pub front_matter: FrontMatter,

    /// Excerpt for listings
    pub excerpt: Option<String>,

    /// Document state
    pub state: DocumentState,
}

impl Document {
    /// Create a new document from parsed content
    pub fn new(
        path: PathBuf,
        relative_path: PathBuf,
        collection: String,
        content: String,
        front_matter: FrontMatter,
        is_draft: bool,
    ) -> Self {
        let date = front_matter
            .get_date()
            .or_else(|| date_from_filename(&path));

        let state = if is_draft || front_matter.draft.unwrap_or(false) {
            DocumentState::Draft
        } else if !front_matter.is_published() {
            DocumentState::Unpublished
        } else {
            DocumentState::Published
        };

        let excerpt = extract_excerpt(&content, &front_matter);
        let id = relative_path.to_string_lossy().to_string();

        Document {
            id,
            path,
            relative_path,
            url: String::new(),
            collection,
            date,
            content,
            front_matter,
            excerpt,
            state,
        }
    }

    /// Title for listings: front matter first, then the first heading in
    /// the body, then the relative path
    pub fn title(&self) -> String {
        self.front_matter
            .title
            .clone()
            .or_else(|| extract_title_from_content(&self.content))
            .unwrap_or_else(|| self.relative_path.to_string_lossy().to_string())
    }

    /// Expose the document to Liquid templates as a `page`-shaped object
    pub fn to_liquid(&self) -> Object {
        let mut obj = Object::new();
        obj.insert("id".into(), Value::scalar(self.id.clone()));
        obj.insert("title".into(), Value::scalar(self.title()));
        obj.insert("url".into(), Value::scalar(self.url.clone()));
        obj.insert("collection".into(), Value::scalar(self.collection.clone()));

        if let Some(date) = &self.date {
            obj.insert("date".into(), Value::scalar(date.to_rfc3339()));
        }
        if let Some(description) = &self.front_matter.description {
            obj.insert("description".into(), Value::scalar(description.clone()));
        }
        if let Some(excerpt) = &self.excerpt {
            obj.insert("excerpt".into(), Value::scalar(excerpt.clone()));
        }
        if let Some(author) = &self.front_matter.author {
            obj.insert("author".into(), Value::scalar(author.clone()));
        }

        let tags = self.front_matter.tags.clone().unwrap_or_default();
        obj.insert(
            "tags".into(),
            Value::Array(tags.into_iter().map(Value::scalar).collect()),
        );

        let categories = self.front_matter.categories.clone().unwrap_or_default();
        obj.insert(
            "categories".into(),
            Value::Array(categories.into_iter().map(Value::scalar).collect()),
        );

        obj
    }
}

/// A collection of documents
#[derive(Debug, Clone)]
pub struct Collection {
    /// The name of the collection
    pub label: String,

    /// Whether to output the collection as individual pages
    pub output: bool,

    /// The permalink pattern for this collection
    pub permalink: Option<String>,

    /// Sort field for documents in this collection
    pub sort_by: String,

    /// The absolute directory path for this collection
    pub directory: PathBuf,

    /// Documents in the collection
    pub documents: Vec<Document>,
}

impl Collection {
    /// Create an empty collection rooted at its source directory
    pub fn new(label: &str, config: &CollectionConfig, directory: PathBuf) -> Self {
        Collection {
            label: label.to_string(),
            output: config.output,
            permalink: config.permalink.clone(),
            sort_by: config.sort_by.clone(),
            directory,
            documents: Vec::new(),
        }
    }

    /// The permalink pattern documents in this collection use
    pub fn permalink_pattern<'a>(&'a self, config: &'a Config) -> &'a str {
        self.permalink.as_deref().unwrap_or(&config.permalink)
    }

    /// Sort documents by the configured field.
    ///
    /// Dates sort newest-first; everything else sorts ascending by the
    /// field's string value.
    pub fn sort_documents(&mut self) {
        match self.sort_by.as_str() {
            "date" => self
                .documents
                .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))),
            "title" => self
                .documents
                .sort_by(|a, b| a.title().cmp(&b.title()).then_with(|| a.id.cmp(&b.id))),
            field => self.documents.sort_by(|a, b| {
                let av = custom_sort_key(a, field);
                let bv = custom_sort_key(b, field);
                av.cmp(&bv).then_with(|| a.id.cmp(&b.id))
            }),
        }
    }

    /// Expose the collection as an array of Liquid objects
    pub fn to_liquid(&self) -> Value {
        Value::Array(
            self.documents
                .iter()
                .map(|doc| Value::Object(doc.to_liquid()))
                .collect(),
        )
    }
}

fn custom_sort_key(doc: &Document, field: &str) -> String {
    doc.front_matter
        .custom
        .get(field)
        .map(yaml_scalar_to_string)
        .unwrap_or_default()
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Derive a date from a `YYYY-MM-DD-title.md` style filename
pub fn date_from_filename(path: &Path) -> Option<DateTime<Utc>> {
    let stem = path.file_stem()?.to_str()?;
    let prefix = stem.get(..10)?;

    let date = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(relative: &str, yaml: &str) -> Document {
        let front_matter: FrontMatter = serde_yaml::from_str(yaml).unwrap();
        Document::new(
            PathBuf::from("/site").join(relative),
            PathBuf::from(relative),
            "posts".to_string(),
            "Body text.".to_string(),
            front_matter,
            false,
        )
    }

    #[test]
    fn test_date_from_filename() {
        assert!(date_from_filename(Path::new("_posts/2026-01-15-hello.md")).is_some());
        assert!(date_from_filename(Path::new("_posts/hello.md")).is_none());
        assert!(date_from_filename(Path::new("_posts/20260115-x.md")).is_none());
    }

    #[test]
    fn test_front_matter_date_wins_over_filename() {
        let d = doc("_posts/2026-01-15-hello.md", "date: 2026-02-20\n");
        assert_eq!(d.date.unwrap().format("%Y-%m-%d").to_string(), "2026-02-20");
    }

    #[test]
    fn test_unpublished_state() {
        let d = doc("_posts/2026-01-15-x.md", "published: false\n");
        assert_eq!(d.state, DocumentState::Unpublished);
    }

    #[test]
    fn test_draft_front_matter_flag() {
        let d = doc("_posts/2026-01-15-x.md", "draft: true\n");
        assert_eq!(d.state, DocumentState::Draft);
    }

    #[test]
    fn test_sort_by_date_is_newest_first() {
        let mut collection = Collection::new(
            "posts",
            &CollectionConfig::default(),
            PathBuf::from("_posts"),
        );
        collection.documents = vec![
            doc("_posts/2026-01-01-old.md", "title: Old\n"),
            doc("_posts/2026-03-01-new.md", "title: New\n"),
        ];

        collection.sort_documents();
        assert_eq!(collection.documents[0].title(), "New");
    }

    #[test]
    fn test_sort_by_custom_field() {
        let mut collection = Collection::new(
            "notes",
            &CollectionConfig {
                sort_by: "order".to_string(),
                ..CollectionConfig::default()
            },
            PathBuf::from("_notes"),
        );
        collection.documents = vec![
            doc("_notes/b.md", "title: B\norder: \"2\"\n"),
            doc("_notes/a.md", "title: A\norder: \"1\"\n"),
        ];

        collection.sort_documents();
        assert_eq!(collection.documents[0].title(), "A");
    }
}

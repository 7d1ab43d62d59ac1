use std::collections::HashMap;
use std::path::PathBuf;

use liquid::model::Value;
use liquid::Object;
use serde::{Deserialize, Serialize};

use crate::collections::schema::CollectionSchema;
use crate::config::defaults;
use crate::toc::TocLevels;

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source directory for the site
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Destination directory for the generated site
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Layouts directory
    #[serde(default = "defaults::default_layouts_dir")]
    pub layouts_dir: PathBuf,

    /// Includes directory (Liquid partials)
    #[serde(default = "defaults::default_includes_dir")]
    pub includes_dir: PathBuf,

    /// Base URL path the site is served under (e.g. "/blog")
    #[serde(default = "defaults::default_base_url")]
    pub base_url: String,

    /// Absolute site URL (e.g. "https://example.com")
    #[serde(default)]
    pub url: Option<String>,

    /// Site title
    #[serde(default = "defaults::default_site_title")]
    pub title: String,

    /// Site description
    #[serde(default = "defaults::default_site_description")]
    pub description: String,

    /// Site author
    #[serde(default)]
    pub author: Option<String>,

    /// Permalink pattern or named style for posts
    #[serde(default = "defaults::default_permalink")]
    pub permalink: String,

    /// Glob patterns of files to exclude from the build
    #[serde(default = "defaults::default_exclude")]
    pub exclude: Vec<String>,

    /// Glob patterns of files to force-include despite exclusion rules
    #[serde(default)]
    pub include: Vec<String>,

    /// Content collections, keyed by label
    #[serde(default)]
    pub collections: HashMap<String, CollectionConfig>,

    /// Markdown rendering options
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// File extensions treated as Markdown
    #[serde(default = "defaults::default_markdown_extensions")]
    pub markdown_ext: Vec<String>,

    /// Files to keep in the destination during clean
    #[serde(default)]
    pub keep_files: Vec<String>,

    /// Posts directory (default "_posts")
    #[serde(default = "defaults::default_posts_dir")]
    pub posts_dir: String,

    /// Drafts directory (default "_drafts")
    #[serde(default = "defaults::default_drafts_dir")]
    pub drafts_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        // serde_yaml fills every field from its #[serde(default)] attribute
        serde_yaml::from_str("{}").expect("default config is valid")
    }
}

impl Config {
    /// Expose site metadata to Liquid templates as the `site` object base
    pub fn to_liquid(&self) -> Object {
        let mut site = Object::new();
        site.insert("title".into(), Value::scalar(self.title.clone()));
        site.insert("description".into(), Value::scalar(self.description.clone()));
        site.insert(
            "author".into(),
            Value::scalar(self.author.clone().unwrap_or_default()),
        );
        site.insert("baseurl".into(), Value::scalar(self.base_url.clone()));
        site.insert(
            "url".into(),
            Value::scalar(self.url.clone().unwrap_or_default()),
        );
        site
    }

    /// Configuration for a collection, falling back to defaults for
    /// undeclared collections such as the built-in posts
    pub fn collection_config(&self, label: &str) -> CollectionConfig {
        self.collections.get(label).cloned().unwrap_or_default()
    }
}

/// Configuration for one content collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Whether documents render to individual pages
    #[serde(default = "defaults::default_true")]
    pub output: bool,

    /// Permalink pattern override for this collection
    #[serde(default)]
    pub permalink: Option<String>,

    /// Front matter field documents are sorted by
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// Front matter schema enforced at load time
    #[serde(default)]
    pub schema: Option<CollectionSchema>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            output: true,
            permalink: None,
            sort_by: default_sort_by(),
            schema: None,
        }
    }
}

fn default_sort_by() -> String {
    "date".to_string()
}

/// Markdown rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Whether to build a table of contents for documents
    #[serde(default = "defaults::default_true")]
    pub toc: bool,

    /// Heading depth pair forming the two levels of the table of contents
    #[serde(default)]
    pub toc_levels: TocLevels,

    /// Syntect theme used for code block highlighting
    #[serde(default = "defaults::default_highlighter_theme")]
    pub highlighter_theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        MarkdownConfig {
            toc: true,
            toc_levels: TocLevels::default(),
            highlighter_theme: defaults::default_highlighter_theme(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.source, PathBuf::from("."));
        assert_eq!(config.destination, PathBuf::from("./_site"));
        assert_eq!(config.permalink, "pretty");
        assert!(config.markdown.toc);
        assert_eq!(config.markdown.toc_levels, TocLevels::default());
    }

    #[test]
    fn test_collection_config_with_schema() {
        let yaml = r#"
collections:
  notes:
    output: false
    schema:
      fields:
        title: { type: string, required: true }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let notes = config.collection_config("notes");

        assert!(!notes.output);
        let schema = notes.schema.expect("schema parsed");
        assert!(schema.fields.get("title").unwrap().required);
    }

    #[test]
    fn test_posts_defaults_when_unconfigured() {
        let config = Config::default();
        let posts = config.collection_config("posts");

        assert!(posts.output);
        assert_eq!(posts.sort_by, "date");
        assert!(posts.schema.is_none());
    }
}

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::collections::document::{Collection, Document, DocumentState};
use crate::collections::schema::CollectionSchema;
use crate::collections::types::BoxResult;
use crate::config::{process_permalink, Config};
use crate::front_matter;
use crate::utils::fs;
use crate::utils::path as path_util;

/// Options controlling which documents a load includes
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Include documents from the drafts directory
    pub drafts: bool,
    /// Include documents marked `published: false`
    pub unpublished: bool,
}

/// Load all collections from the filesystem based on configuration.
///
/// The posts collection always exists; further collections come from the
/// config's `collections` table and live in `_<label>` directories. Schema
/// validation runs here, so a build never proceeds with content that
/// violates its collection's declared shape.
pub fn load_collections(
    config: &Config,
    options: LoadOptions,
) -> BoxResult<HashMap<String, Collection>> {
    info!("Loading collections...");
    let mut collections = HashMap::new();

    let mut labels: Vec<String> = config.collections.keys().cloned().collect();
    if !labels.iter().any(|l| l == "posts") {
        labels.push("posts".to_string());
    }

    for label in labels {
        let collection_config = config.collection_config(&label);
        let directory = if label == "posts" {
            config.source.join(&config.posts_dir)
        } else {
            config.source.join(format!("_{}", label))
        };

        let mut collection = Collection::new(&label, &collection_config, directory);
        load_collection_documents(
            &mut collection,
            config,
            collection_config.schema.as_ref(),
            options,
            false,
        )?;

        // Drafts fold into the posts collection, undated drafts last
        if label == "posts" && options.drafts {
            let drafts_dir = config.source.join(&config.drafts_dir);
            let mut drafts = Collection::new(&label, &collection_config, drafts_dir);
            load_collection_documents(
                &mut drafts,
                config,
                collection_config.schema.as_ref(),
                options,
                true,
            )?;
            collection.documents.append(&mut drafts.documents);
        }

        collection.sort_documents();
        debug!(
            "Loaded {} documents for collection: {}",
            collection.documents.len(),
            collection.label
        );
        collections.insert(label, collection);
    }

    Ok(collections)
}

/// Load the documents of one collection directory
fn load_collection_documents(
    collection: &mut Collection,
    config: &Config,
    schema: Option<&CollectionSchema>,
    options: LoadOptions,
    as_drafts: bool,
) -> BoxResult<()> {
    if !collection.directory.exists() {
        debug!(
            "Collection directory does not exist: {}",
            collection.directory.display()
        );
        return Ok(());
    }

    let markdown_exts: Vec<&str> = config.markdown_ext.iter().map(|s| s.as_str()).collect();

    for entry in WalkDir::new(&collection.directory).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !path_util::has_any_extension(path, &markdown_exts) {
            continue;
        }

        if let Some(doc) = parse_document(path, collection, config, schema, as_drafts)? {
            match doc.state {
                DocumentState::Unpublished if !options.unpublished => {
                    debug!("Skipping unpublished document: {}", doc.id);
                }
                _ => collection.documents.push(doc),
            }
        }
    }

    Ok(())
}

/// Parse one document file, validating it against the collection schema
fn parse_document(
    path: &Path,
    collection: &Collection,
    config: &Config,
    schema: Option<&CollectionSchema>,
    as_draft: bool,
) -> BoxResult<Option<Document>> {
    let raw = fs::read_file(path)?;
    let relative_path = path
        .strip_prefix(&config.source)
        .unwrap_or(path)
        .to_path_buf();
    let doc_path = relative_path.to_string_lossy().to_string();

    if let Some(schema) = schema {
        let mapping = front_matter::parse_raw(&raw).map_err(|e| {
            crate::utils::error::QuillError::FrontMatter(format!("{}: {}", doc_path, e))
        })?;
        schema.validate(&doc_path, &mapping)?;
    }

    let (parsed_front_matter, body) = match front_matter::parse(&raw) {
        Ok(result) => result,
        Err(e) => {
            // Without a schema, a bad front matter block degrades to a
            // verbatim document rather than failing the build
            warn!("Error parsing front matter in {}: {}", doc_path, e);
            (Default::default(), raw.clone())
        }
    };

    let mut doc = Document::new(
        path.to_path_buf(),
        relative_path,
        collection.label.clone(),
        body,
        parsed_front_matter,
        as_draft,
    );

    let pattern = collection.permalink_pattern(config);
    doc.url = process_permalink(pattern, &doc.front_matter, &collection.label, &doc.path);

    Ok(Some(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use std::path::PathBuf;

    fn temp_site(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quillpress-collections-{}", name));
        let _ = stdfs::remove_dir_all(&dir);
        stdfs::create_dir_all(dir.join("_posts")).unwrap();
        dir
    }

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.source = dir.to_path_buf();
        config
    }

    #[test]
    fn test_load_posts() {
        let dir = temp_site("basic");
        stdfs::write(
            dir.join("_posts/2026-01-15-hello.md"),
            "---\ntitle: Hello\n---\n\nFirst post.\n",
        )
        .unwrap();
        stdfs::write(
            dir.join("_posts/2026-02-01-second.md"),
            "---\ntitle: Second\n---\n\nSecond post.\n",
        )
        .unwrap();

        let collections = load_collections(&config_for(&dir), LoadOptions::default()).unwrap();
        let posts = &collections["posts"];

        assert_eq!(posts.documents.len(), 2);
        // Newest first
        assert_eq!(posts.documents[0].title(), "Second");
        assert_eq!(posts.documents[1].url, "/posts/hello/");
    }

    #[test]
    fn test_unpublished_documents_are_skipped() {
        let dir = temp_site("unpublished");
        stdfs::write(
            dir.join("_posts/2026-01-15-secret.md"),
            "---\ntitle: Secret\npublished: false\n---\n\nHidden.\n",
        )
        .unwrap();

        let collections = load_collections(&config_for(&dir), LoadOptions::default()).unwrap();
        assert!(collections["posts"].documents.is_empty());

        let with_unpublished = load_collections(
            &config_for(&dir),
            LoadOptions {
                unpublished: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(with_unpublished["posts"].documents.len(), 1);
    }

    #[test]
    fn test_drafts_are_included_on_request() {
        let dir = temp_site("drafts");
        stdfs::create_dir_all(dir.join("_drafts")).unwrap();
        stdfs::write(
            dir.join("_drafts/wip.md"),
            "---\ntitle: WIP\n---\n\nNot done.\n",
        )
        .unwrap();

        let without = load_collections(&config_for(&dir), LoadOptions::default()).unwrap();
        assert!(without["posts"].documents.is_empty());

        let with_drafts = load_collections(
            &config_for(&dir),
            LoadOptions {
                drafts: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(with_drafts["posts"].documents.len(), 1);
        assert_eq!(with_drafts["posts"].documents[0].state, DocumentState::Draft);
    }

    #[test]
    fn test_schema_violation_fails_the_load() {
        let dir = temp_site("schema");
        let yaml = r#"
collections:
  posts:
    schema:
      fields:
        title: { type: string, required: true }
"#;
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        config.source = dir.clone();

        stdfs::write(
            dir.join("_posts/2026-01-15-untitled.md"),
            "---\nlayout: post\n---\n\nNo title here.\n",
        )
        .unwrap();

        let err = load_collections(&config, LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_extra_collection_directory() {
        let dir = temp_site("notes");
        stdfs::create_dir_all(dir.join("_notes")).unwrap();
        stdfs::write(
            dir.join("_notes/first.md"),
            "---\ntitle: First Note\n---\n\nA note.\n",
        )
        .unwrap();

        let yaml = "collections:\n  notes:\n    output: true\n";
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        config.source = dir.clone();

        let collections = load_collections(&config, LoadOptions::default()).unwrap();
        assert_eq!(collections["notes"].documents.len(), 1);
        assert_eq!(collections["notes"].documents[0].url, "/notes/first-note/");
    }
}

use std::collections::HashMap;
use std::fs as stdfs;
use std::path::PathBuf;

use glob::Pattern;
use liquid::model::Value;
use liquid::{Object, Parser};
use log::{debug, info};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::builder::page::{collect_pages, Page};
use crate::builder::types::BoxResult;
use crate::collections::{collections_to_liquid, load_collections, Document, LoadOptions};
use crate::config::Config;
use crate::layout::LayoutRenderer;
use crate::templating::{create_parser, create_site_object, parse_liquid};
use crate::markdown::MarkdownRenderer;
use crate::utils::error::QuillError;
use crate::utils::fs;
use crate::utils::path as path_util;

/// Counts reported after a successful build
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub documents: usize,
    pub pages: usize,
    pub static_files: usize,
}

/// Build the site: load collections and pages, render everything through
/// the markdown and layout pipeline, write the destination tree.
pub fn build_site(config: &Config, options: LoadOptions) -> BoxResult<BuildStats> {
    let destination = destination_dir(config);
    info!("Building site into {}", destination.display());

    clean_destination(config)?;

    let includes = load_includes(config)?;
    let parser = create_parser(config, includes)?;
    let layouts = LayoutRenderer::load(config)?;

    let collections = load_collections(config, options)?;

    let mut site = create_site_object(config);
    for (label, value) in collections_to_liquid(&collections) {
        site.insert(label, value);
    }

    let pages = collect_pages(config)?;

    let mut stats = BuildStats::default();

    // Documents are independent; render them in parallel with a
    // per-thread markdown renderer
    for collection in collections.values() {
        if !collection.output {
            debug!("Collection '{}' does not output pages", collection.label);
            continue;
        }

        collection
            .documents
            .par_iter()
            .map_init(
                || MarkdownRenderer::new(config),
                |renderer, doc| {
                    render_document(doc, config, &parser, &layouts, renderer, &site)
                        .map_err(|e| format!("{}: {}", doc.id, e))
                },
            )
            .collect::<Result<Vec<()>, String>>()
            .map_err(QuillError::Generic)?;

        stats.documents += collection.documents.len();
    }

    let (processable, static_files): (Vec<&Page>, Vec<&Page>) =
        pages.iter().partition(|p| p.process);

    processable
        .par_iter()
        .map_init(
            || MarkdownRenderer::new(config),
            |renderer, page| {
                render_page(page, config, &parser, &layouts, renderer, &site)
                    .map_err(|e| format!("{}: {}", page.relative_path.display(), e))
            },
        )
        .collect::<Result<Vec<()>, String>>()
        .map_err(QuillError::Generic)?;
    stats.pages = processable.len();

    for page in &static_files {
        let target = destination.join(&page.relative_path);
        fs::copy_file(&page.path, &target)?;
    }
    stats.static_files = static_files.len();

    info!(
        "Site built: {} documents, {} pages, {} static files",
        stats.documents, stats.pages, stats.static_files
    );
    Ok(stats)
}

/// Resolve the destination directory relative to the source
pub fn destination_dir(config: &Config) -> PathBuf {
    if config.destination.is_absolute() {
        config.destination.clone()
    } else {
        config.source.join(&config.destination)
    }
}

/// Empty the destination directory, keeping entries matched by
/// `keep_files`
pub fn clean_destination(config: &Config) -> BoxResult<()> {
    let destination = destination_dir(config);
    if !destination.exists() {
        fs::create_directory(&destination)?;
        return Ok(());
    }

    let keep: Vec<Pattern> = config
        .keep_files
        .iter()
        .filter_map(|g| Pattern::new(g).ok())
        .collect();

    for entry in stdfs::read_dir(&destination)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if keep.iter().any(|p| p.matches(&name)) {
            debug!("Keeping {} during clean", name);
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            stdfs::remove_dir_all(&path)?;
        } else {
            stdfs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// Load Liquid partials from the includes directory, keyed by their path
/// relative to it
fn load_includes(config: &Config) -> BoxResult<HashMap<String, String>> {
    let includes_dir = config.source.join(&config.includes_dir);
    let mut includes = HashMap::new();

    if !includes_dir.exists() {
        return Ok(includes);
    }

    for entry in WalkDir::new(&includes_dir) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = path
            .strip_prefix(&includes_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        includes.insert(name, fs::read_file(path)?);
    }

    debug!("Loaded {} includes", includes.len());
    Ok(includes)
}

/// Render one collection document and write it out
fn render_document(
    doc: &Document,
    config: &Config,
    parser: &Parser,
    layouts: &LayoutRenderer,
    renderer: &MarkdownRenderer<'_>,
    site: &Object,
) -> BoxResult<()> {
    let mut page_obj = doc.to_liquid();

    let mut globals = Object::new();
    globals.insert("site".into(), Value::Object(site.clone()));
    globals.insert("page".into(), Value::Object(page_obj.clone()));

    // Liquid first, so documents can reference site data in their body
    let body = parse_liquid(&doc.content, parser, &globals)?;
    let rendered = renderer.render(&body, doc.front_matter.toc)?;

    page_obj.insert("toc".into(), Value::scalar(rendered.toc_html.clone()));
    globals.insert("page".into(), Value::Object(page_obj));
    globals.insert("toc".into(), Value::scalar(rendered.toc_html.clone()));

    let html = apply_layout(
        &rendered.html,
        doc.front_matter.layout.as_deref(),
        layouts,
        parser,
        &globals,
    )?;

    let output_path = path_util::url_to_output_path(destination_dir(config), &doc.url);
    fs::write_file(&output_path, &html)?;
    debug!("Wrote {} -> {}", doc.id, output_path.display());

    Ok(())
}

/// Render one standalone page and write it out
fn render_page(
    page: &Page,
    config: &Config,
    parser: &Parser,
    layouts: &LayoutRenderer,
    renderer: &MarkdownRenderer<'_>,
    site: &Object,
) -> BoxResult<()> {
    let url = match &page.url {
        Some(url) => url.clone(),
        None => return Ok(()),
    };

    let mut page_obj = Object::new();
    if let Some(title) = &page.front_matter.title {
        page_obj.insert("title".into(), Value::scalar(title.clone()));
    }
    if let Some(description) = &page.front_matter.description {
        page_obj.insert("description".into(), Value::scalar(description.clone()));
    }
    page_obj.insert("url".into(), Value::scalar(url.clone()));

    let mut globals = Object::new();
    globals.insert("site".into(), Value::Object(site.clone()));
    globals.insert("page".into(), Value::Object(page_obj.clone()));

    let body = parse_liquid(&page.content, parser, &globals)?;

    let is_markdown = path_util::has_any_extension(
        &page.path,
        &config
            .markdown_ext
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>(),
    );

    let (content, toc_html) = if is_markdown {
        let rendered = renderer.render(&body, page.front_matter.toc)?;
        (rendered.html, rendered.toc_html)
    } else {
        (body, String::new())
    };

    page_obj.insert("toc".into(), Value::scalar(toc_html.clone()));
    globals.insert("page".into(), Value::Object(page_obj));
    globals.insert("toc".into(), Value::scalar(toc_html));

    let html = apply_layout(
        &content,
        page.front_matter.layout.as_deref(),
        layouts,
        parser,
        &globals,
    )?;

    let output_path = path_util::url_to_output_path(destination_dir(config), &url);
    fs::write_file(&output_path, &html)?;

    Ok(())
}

/// Wrap content in its layout chain.
///
/// Without an explicit layout the site-wide `default` layout applies when
/// one exists; otherwise the content stands alone.
fn apply_layout(
    content: &str,
    layout: Option<&str>,
    layouts: &LayoutRenderer,
    parser: &Parser,
    globals: &Object,
) -> BoxResult<String> {
    let name = match layout {
        Some(name) => Some(name),
        None if layouts.has_layout("default") => Some("default"),
        None => None,
    };

    match name {
        Some(name) => layouts.render(content, name, parser, globals),
        None => Ok(content.to_string()),
    }
}

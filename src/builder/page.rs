use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::front_matter::{self, FrontMatter};
use crate::utils::error::BoxResult;
use crate::utils::fs;
use crate::utils::path as path_util;

/// A standalone content file outside any collection
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute path to the source file
    pub path: PathBuf,

    /// Path relative to the source directory
    pub relative_path: PathBuf,

    /// URL for processed pages; static files keep their relative path
    pub url: Option<String>,

    /// Body without front matter (empty for static files)
    pub content: String,

    /// Front matter data
    pub front_matter: FrontMatter,

    /// Whether the page goes through the render pipeline or is copied
    pub process: bool,
}

/// Collect all pages and static files from the site source directory.
///
/// Underscore-prefixed and hidden directories belong to the generator
/// (collections, layouts, includes, the destination) and are skipped, as is
/// anything matching the exclude globs unless an include glob claims it
/// back.
pub fn collect_pages(config: &Config) -> BoxResult<Vec<Page>> {
    debug!("Collecting pages...");
    let mut pages = Vec::new();

    let exclude = compile_patterns(&config.exclude);
    let include = compile_patterns(&config.include);
    let markdown_exts: Vec<&str> = config.markdown_ext.iter().map(|s| s.as_str()).collect();

    let walker = WalkDir::new(&config.source)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_internal_path(e.path(), config));

    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative_path = path
            .strip_prefix(&config.source)
            .unwrap_or(path)
            .to_path_buf();

        if is_excluded(&relative_path, &exclude, &include) {
            continue;
        }

        let is_markdown = path_util::has_any_extension(path, &markdown_exts);
        let is_html = path_util::has_any_extension(path, &["html"]);

        let page = if is_markdown || is_html {
            match build_processable_page(path, &relative_path, config, is_markdown) {
                Ok(page) => page,
                Err(e) => {
                    warn!("Error reading page {}: {}", path.display(), e);
                    continue;
                }
            }
        } else {
            Page {
                path: path.to_path_buf(),
                relative_path: relative_path.clone(),
                url: None,
                content: String::new(),
                front_matter: FrontMatter::default(),
                process: false,
            }
        };

        pages.push(page);
    }

    debug!("Collected {} pages", pages.len());
    Ok(pages)
}

fn build_processable_page(
    path: &Path,
    relative_path: &Path,
    config: &Config,
    is_markdown: bool,
) -> BoxResult<Page> {
    let raw = fs::read_file(path)?;

    // An HTML file without front matter is a static asset
    if !is_markdown && !front_matter::has_front_matter(&raw) {
        return Ok(Page {
            path: path.to_path_buf(),
            relative_path: relative_path.to_path_buf(),
            url: None,
            content: String::new(),
            front_matter: FrontMatter::default(),
            process: false,
        });
    }

    let (parsed, content) = front_matter::parse(&raw)?;
    let url = page_url(relative_path, &parsed, is_markdown);

    Ok(Page {
        path: path.to_path_buf(),
        relative_path: relative_path.to_path_buf(),
        url: Some(url),
        content,
        front_matter: parsed,
        process: true,
    })
}

/// Derive a page URL from its relative path.
///
/// Markdown pages get pretty URLs (`about.md` renders at `/about/`), HTML
/// pages keep their path, and `index` files map to their directory root. A
/// front matter permalink overrides everything.
fn page_url(relative_path: &Path, front_matter: &FrontMatter, is_markdown: bool) -> String {
    if let Some(permalink) = &front_matter.permalink {
        let mut url = permalink.clone();
        if !url.starts_with('/') {
            url = format!("/{}", url);
        }
        return url;
    }

    let parent = relative_path
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    let stem = path_util::get_stem(relative_path).unwrap_or_else(|| "index".to_string());

    let prefix = if parent.is_empty() {
        String::new()
    } else {
        format!("/{}", parent)
    };

    if stem == "index" {
        format!("{}/", prefix)
    } else if is_markdown {
        format!("{}/{}/", prefix, stem)
    } else {
        format!("{}/{}.html", prefix, stem)
    }
}

/// Directories the generator owns: destination, layouts, includes,
/// collections, drafts, dotfiles
fn is_internal_path(path: &Path, config: &Config) -> bool {
    let destination = config.source.join(&config.destination);
    if path == destination || path.starts_with(&destination) || path == config.destination {
        return true;
    }

    if let Ok(relative) = path.strip_prefix(&config.source) {
        for component in relative.components() {
            let name = component.as_os_str().to_string_lossy();
            if name.starts_with('_') || (name.starts_with('.') && name != ".") {
                return true;
            }
        }
    }

    false
}

fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|g| match Pattern::new(g) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Ignoring invalid glob pattern '{}': {}", g, e);
                None
            }
        })
        .collect()
}

fn is_excluded(relative_path: &Path, exclude: &[Pattern], include: &[Pattern]) -> bool {
    let as_str = relative_path.to_string_lossy().replace('\\', "/");

    let excluded = exclude.iter().any(|p| {
        p.matches(&as_str)
            || relative_path
                .components()
                .any(|c| p.matches(&c.as_os_str().to_string_lossy()))
    });

    if excluded {
        return !include.iter().any(|p| p.matches(&as_str));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    fn temp_site(name: &str) -> Config {
        let dir = std::env::temp_dir().join(format!("quillpress-pages-{}", name));
        let _ = stdfs::remove_dir_all(&dir);
        stdfs::create_dir_all(&dir).unwrap();

        let mut config = Config::default();
        config.source = dir;
        config
    }

    #[test]
    fn test_markdown_pages_get_pretty_urls() {
        let config = temp_site("pretty");
        stdfs::write(
            config.source.join("about.md"),
            "---\ntitle: About\n---\n\nHi.\n",
        )
        .unwrap();

        let pages = collect_pages(&config).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].url.as_deref(), Some("/about/"));
        assert!(pages[0].process);
    }

    #[test]
    fn test_index_maps_to_root() {
        let config = temp_site("index");
        stdfs::write(
            config.source.join("index.html"),
            "---\nlayout: default\n---\n<p>home</p>\n",
        )
        .unwrap();

        let pages = collect_pages(&config).unwrap();
        assert_eq!(pages[0].url.as_deref(), Some("/"));
    }

    #[test]
    fn test_html_without_front_matter_is_static() {
        let config = temp_site("static");
        stdfs::write(config.source.join("404.html"), "<h1>Not found</h1>\n").unwrap();

        let pages = collect_pages(&config).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].process);
    }

    #[test]
    fn test_underscore_directories_are_skipped() {
        let config = temp_site("underscore");
        stdfs::create_dir_all(config.source.join("_posts")).unwrap();
        stdfs::write(config.source.join("_posts/x.md"), "body").unwrap();
        stdfs::write(config.source.join("visible.md"), "body").unwrap();

        let pages = collect_pages(&config).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].relative_path, PathBuf::from("visible.md"));
    }

    #[test]
    fn test_excluded_files_are_skipped() {
        let config = temp_site("exclude");
        stdfs::write(config.source.join("README.md"), "readme").unwrap();
        stdfs::write(config.source.join("kept.md"), "kept").unwrap();

        let pages = collect_pages(&config).unwrap();
        let names: Vec<String> = pages
            .iter()
            .map(|p| p.relative_path.to_string_lossy().to_string())
            .collect();

        assert!(names.contains(&"kept.md".to_string()));
        assert!(!names.contains(&"README.md".to_string()));
    }
}

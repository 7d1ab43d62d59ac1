use std::collections::{HashMap, HashSet};

use liquid::model::Value;
use liquid::{Object, Parser};
use log::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::front_matter;
use crate::templating::parse_liquid;
use crate::utils::error::{BoxResult, QuillError};
use crate::utils::fs;
use crate::utils::path;

/// One loaded layout template
#[derive(Debug, Clone)]
pub struct Layout {
    /// Template body without front matter
    pub content: String,
    /// Parent layout this one wraps itself in, from its own front matter
    pub parent: Option<String>,
}

/// Renderer for Liquid layouts with parent chaining.
///
/// A document rendered with layout `post` whose front matter names
/// `layout: default` is wrapped twice: the post layout receives the
/// document as `content`, then the default layout receives the result.
pub struct LayoutRenderer {
    layouts: HashMap<String, Layout>,
}

impl LayoutRenderer {
    /// Load all layouts from the configured layouts directory
    pub fn load(config: &Config) -> BoxResult<Self> {
        let layouts_dir = config.source.join(&config.layouts_dir);
        let mut layouts = HashMap::new();

        if layouts_dir.exists() {
            for entry in WalkDir::new(&layouts_dir).max_depth(1) {
                let entry = entry?;
                let file = entry.path();

                if !file.is_file() || !path::has_any_extension(file, &["html", "liquid"]) {
                    continue;
                }

                let name = match path::get_stem(file) {
                    Some(name) => name,
                    None => continue,
                };

                let raw = fs::read_file(file)?;
                let (layout_front_matter, content) = front_matter::parse(&raw)
                    .map_err(|e| QuillError::Template(format!("layout {}: {}", name, e)))?;

                debug!("Loaded layout: {}", name);
                layouts.insert(
                    name,
                    Layout {
                        content,
                        parent: layout_front_matter.layout,
                    },
                );
            }
        }

        Ok(LayoutRenderer { layouts })
    }

    /// Whether a layout with this name exists
    pub fn has_layout(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Render content through a layout and its parent chain
    pub fn render(
        &self,
        content: &str,
        layout_name: &str,
        parser: &Parser,
        globals: &Object,
    ) -> BoxResult<String> {
        let mut rendered = content.to_string();
        let mut next = Some(layout_name.to_string());
        let mut seen: HashSet<String> = HashSet::new();

        while let Some(name) = next {
            if !seen.insert(name.clone()) {
                return Err(QuillError::Template(format!(
                    "Layout cycle detected at '{}'",
                    name
                ))
                .into());
            }

            let layout = self.layouts.get(&name).ok_or_else(|| {
                QuillError::Template(format!("Layout not found: {}", name))
            })?;

            let mut render_globals = globals.clone();
            render_globals.insert("content".into(), Value::scalar(rendered));

            rendered = parse_liquid(&layout.content, parser, &render_globals)?;
            next = layout.parent.clone();
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::create_parser;
    use std::fs as stdfs;
    use std::path::PathBuf;

    fn site_with_layouts(name: &str, layouts: &[(&str, &str)]) -> Config {
        let dir = std::env::temp_dir().join(format!("quillpress-layouts-{}", name));
        let _ = stdfs::remove_dir_all(&dir);
        stdfs::create_dir_all(dir.join("_layouts")).unwrap();

        for (layout_name, body) in layouts {
            stdfs::write(dir.join("_layouts").join(layout_name), body).unwrap();
        }

        let mut config = Config::default();
        config.source = PathBuf::from(&dir);
        config
    }

    #[test]
    fn test_single_layout() {
        let config = site_with_layouts(
            "single",
            &[("default.html", "<main>{{ content }}</main>")],
        );
        let renderer = LayoutRenderer::load(&config).unwrap();
        let parser = create_parser(&config, HashMap::new()).unwrap();

        let out = renderer
            .render("<p>hi</p>", "default", &parser, &Object::new())
            .unwrap();
        assert_eq!(out, "<main><p>hi</p></main>");
    }

    #[test]
    fn test_layout_chain() {
        let config = site_with_layouts(
            "chain",
            &[
                ("default.html", "<html>{{ content }}</html>"),
                (
                    "post.html",
                    "---\nlayout: default\n---\n<article>{{ content }}</article>",
                ),
            ],
        );
        let renderer = LayoutRenderer::load(&config).unwrap();
        let parser = create_parser(&config, HashMap::new()).unwrap();

        let out = renderer
            .render("body", "post", &parser, &Object::new())
            .unwrap();
        assert_eq!(out, "<html><article>body</article></html>");
    }

    #[test]
    fn test_missing_layout_is_an_error() {
        let config = site_with_layouts("missing", &[]);
        let renderer = LayoutRenderer::load(&config).unwrap();
        let parser = create_parser(&config, HashMap::new()).unwrap();

        assert!(renderer
            .render("x", "nope", &parser, &Object::new())
            .is_err());
    }

    #[test]
    fn test_layout_cycle_is_detected() {
        let config = site_with_layouts(
            "cycle",
            &[
                ("a.html", "---\nlayout: b\n---\n{{ content }}"),
                ("b.html", "---\nlayout: a\n---\n{{ content }}"),
            ],
        );
        let renderer = LayoutRenderer::load(&config).unwrap();
        let parser = create_parser(&config, HashMap::new()).unwrap();

        let err = renderer
            .render("x", "a", &parser, &Object::new())
            .unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }
}

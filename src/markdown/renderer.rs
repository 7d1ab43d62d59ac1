use comrak::Options;
use log::debug;

use crate::config::Config;
use crate::markdown::engine::{create_comrak_options, render_markdown};
use crate::markdown::syntax::SyntaxHighlighter;
use crate::markdown::types::{BoxResult, RenderedDocument};
use crate::toc::{build_toc, extract_headings, render_toc_nav, TocLevels};
use crate::utils::error::QuillError;

/// Markdown renderer producing final HTML plus the document's table of
/// contents
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    highlighter: SyntaxHighlighter,
    toc_enabled: bool,
    toc_levels: TocLevels,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a new markdown renderer from config
    pub fn new(config: &Config) -> Self {
        let options = create_comrak_options();

        let mut highlighter = SyntaxHighlighter::new();
        let theme = &config.markdown.highlighter_theme;
        if !highlighter.set_theme(theme) {
            debug!("Unknown highlighter theme '{}', keeping default", theme);
        }

        MarkdownRenderer {
            options,
            highlighter,
            toc_enabled: config.markdown.toc,
            toc_levels: config.markdown.toc_levels,
        }
    }

    /// Render one document body.
    ///
    /// `toc_override` is the document's front matter `toc` flag; it wins
    /// over the site-wide setting.
    pub fn render(&self, markdown: &str, toc_override: Option<bool>) -> BoxResult<RenderedDocument> {
        let html = render_markdown(markdown, &self.options);
        let html = self
            .highlighter
            .highlight_html(&html)
            .map_err(|e| QuillError::Markdown(e.to_string()))?;

        let headings = extract_headings(&html);

        let build = toc_override.unwrap_or(self.toc_enabled);
        let (toc, toc_html) = if build {
            let toc = build_toc(&headings, self.toc_levels);
            let toc_html = render_toc_nav(&toc);
            (toc, toc_html)
        } else {
            (Vec::new(), String::new())
        };

        Ok(RenderedDocument {
            html,
            headings,
            toc,
            toc_html,
        })
    }
}

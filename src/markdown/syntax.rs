use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::markdown::types::BoxResult;

lazy_static! {
    static ref CODE_BLOCK_REGEX: Regex =
        Regex::new(r#"<pre(?: lang="([^"]+)")?><code(?: class="language-([^"]+)")?>([^<]*)</code></pre>"#)
            .unwrap();
}

/// Component for syntax highlighting code blocks in rendered HTML
pub struct SyntaxHighlighter {
    syntax_set: Arc<SyntaxSet>,
    theme_set: Arc<ThemeSet>,
    current_theme: String,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with default settings
    pub fn new() -> Self {
        let syntax_set = Arc::new(SyntaxSet::load_defaults_newlines());
        let theme_set = Arc::new(ThemeSet::load_defaults());

        SyntaxHighlighter {
            syntax_set,
            theme_set,
            current_theme: "InspiredGitHub".to_string(),
        }
    }

    /// Set the highlighting theme; returns false for unknown themes
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.theme_set.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    /// Process rendered HTML, replacing plain code blocks with highlighted
    /// markup
    pub fn highlight_html(&self, html: &str) -> BoxResult<String> {
        let highlighted = CODE_BLOCK_REGEX.replace_all(html, |caps: &regex::Captures| {
            let code = html_escape::decode_html_entities(&caps[3]).to_string();
            let lang = caps
                .get(2)
                .or_else(|| caps.get(1))
                .map(|m| m.as_str())
                .unwrap_or("text");

            self.highlight_code(&code, lang)
        });

        Ok(highlighted.to_string())
    }

    /// Highlight one code block with the given language token
    pub fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );

        for line in LinesWithEndings::from(code) {
            let _ = generator.parse_html_for_line_which_includes_newline(line);
        }

        let highlighted = generator.finalize();

        format!(
            "<div class=\"highlight\"><pre class=\"highlight {}\"><code>{}</code></pre></div>",
            lang, highlighted
        )
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        SyntaxHighlighter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_code() {
        let highlighter = SyntaxHighlighter::new();
        let code = "fn main() {\n    println!(\"Hello, World!\");\n}";
        let html = highlighter.highlight_code(code, "rust");

        assert!(html.contains("<div class=\"highlight\">"));
        assert!(html.contains("<pre class=\"highlight rust\">"));
    }

    #[test]
    fn test_highlight_html_rewrites_code_blocks() {
        let highlighter = SyntaxHighlighter::new();
        let html = "<pre><code class=\"language-rust\">fn main() {}</code></pre>";
        let processed = highlighter.highlight_html(html).unwrap();

        assert!(processed.contains("<div class=\"highlight\">"));
        assert!(processed.contains("<pre class=\"highlight rust\">"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let highlighter = SyntaxHighlighter::new();
        let html = highlighter.highlight_code("anything", "no-such-language");

        assert!(html.contains("highlight no-such-language"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let mut highlighter = SyntaxHighlighter::new();
        assert!(!highlighter.set_theme("NoSuchTheme"));
        assert!(highlighter.set_theme("InspiredGitHub"));
    }
}

use comrak::Options;

/// Create default comrak options with GitHub Flavored Markdown settings
pub fn create_comrak_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    // Extension options - GitHub Flavored Markdown
    options.extension.strikethrough = true;
    options.extension.tagfilter = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    // Bare heading ids so anchors read as plain slugs
    options.extension.header_ids = Some(String::new());

    // Render options
    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true; // Raw HTML passes through

    // Parse options
    options.parse.smart = true;

    options
}

/// Render markdown to HTML using comrak
pub fn render_markdown(content: &str, options: &Options<'_>) -> String {
    comrak::markdown_to_html(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comrak_rendering() {
        let options = create_comrak_options();
        let markdown = "# Hello, World!\n\nThis is a **bold** statement.";
        let html = render_markdown(markdown, &options);

        assert!(html.contains("<h1"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_header_ids_are_assigned() {
        let options = create_comrak_options();
        let html = render_markdown("## Getting Started", &options);

        assert!(html.contains("id=\"getting-started\""));
    }
}

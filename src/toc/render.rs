use crate::toc::builder::TocNode;

/// Render the table-of-contents tree as nested navigation markup.
///
/// Produces `<nav class="table-of-contents">` wrapping a two-level list of
/// anchor links. An empty tree renders to an empty string so layouts can
/// test `{% if toc != "" %}` before emitting a container.
pub fn render_toc_nav(nodes: &[TocNode]) -> String {
    if nodes.is_empty() {
        return String::new();
    }

    let mut html = String::from("<nav class=\"table-of-contents\" role=\"navigation\">\n<ul>\n");

    for node in nodes {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            node.anchor_id,
            html_escape::encode_text(&node.text)
        ));

        if !node.children.is_empty() {
            html.push_str("\n<ul>\n");
            for child in &node.children {
                html.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>\n",
                    child.anchor_id,
                    html_escape::encode_text(&child.text)
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n</nav>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::builder::{build_toc, TocLevels};
    use crate::toc::headings::HeadingRecord;

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert_eq!(render_toc_nav(&[]), "");
    }

    #[test]
    fn test_nested_markup() {
        let headings = vec![
            HeadingRecord::new("Setup", 2, "setup"),
            HeadingRecord::new("Requirements", 3, "requirements"),
            HeadingRecord::new("Usage", 2, "usage"),
        ];
        let toc = build_toc(&headings, TocLevels::default());
        let html = render_toc_nav(&toc);

        assert!(html.starts_with("<nav class=\"table-of-contents\""));
        assert!(html.contains("<a href=\"#setup\">Setup</a>"));
        assert!(html.contains("<a href=\"#requirements\">Requirements</a>"));
        assert!(html.contains("<a href=\"#usage\">Usage</a>"));
        // Requirements is nested one list deeper than Setup
        let setup_pos = html.find("#setup").unwrap();
        let req_pos = html.find("#requirements").unwrap();
        assert!(req_pos > setup_pos);
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let nodes = vec![TocNode {
            anchor_id: "generics".to_string(),
            text: "Vec<T> & friends".to_string(),
            children: Vec::new(),
        }];

        let html = render_toc_nav(&nodes);
        assert!(html.contains("Vec&lt;T&gt; &amp; friends"));
    }
}

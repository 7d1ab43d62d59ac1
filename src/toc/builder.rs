use log::debug;
use serde::{Deserialize, Serialize};

use crate::toc::headings::HeadingRecord;

/// The pair of heading depths that form the two levels of the tree.
///
/// Blog posts reserve `h1` for the page title, so the table of contents is
/// built from `h2` sections and `h3` subsections by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocLevels {
    pub section: u8,
    pub subsection: u8,
}

impl Default for TocLevels {
    fn default() -> Self {
        TocLevels {
            section: 2,
            subsection: 3,
        }
    }
}

/// One node of the table-of-contents tree.
///
/// A node's children are exactly the contiguous run of subsection headings
/// that follow it in the document, up to the next section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    pub anchor_id: String,
    pub text: String,
    pub children: Vec<TocNode>,
}

impl TocNode {
    fn leaf(record: &HeadingRecord) -> Self {
        TocNode {
            anchor_id: record.anchor_id.clone(),
            text: record.text.clone(),
            children: Vec::new(),
        }
    }
}

/// Fold a flat, document-ordered heading sequence into a two-level tree.
///
/// A single in-order pass with a cursor on the most recent section node:
/// section-depth headings open a new top-level node, subsection-depth
/// headings attach to the open one, every other depth is ignored. A
/// subsection that appears before any section has no parent to attach to
/// and is dropped. Total over any input, including the empty sequence.
pub fn build_toc(headings: &[HeadingRecord], levels: TocLevels) -> Vec<TocNode> {
    let mut nodes: Vec<TocNode> = Vec::new();

    for record in headings {
        if record.depth == levels.section {
            nodes.push(TocNode::leaf(record));
        } else if record.depth == levels.subsection {
            match nodes.last_mut() {
                Some(current) => current.children.push(TocNode::leaf(record)),
                None => {
                    debug!(
                        "Dropping orphan subsection heading '{}' (no preceding section)",
                        record.text
                    );
                }
            }
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(depth: u8, text: &str) -> HeadingRecord {
        HeadingRecord::new(text, depth, slug::slugify(text))
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        assert!(build_toc(&[], TocLevels::default()).is_empty());
    }

    #[test]
    fn test_section_count_is_preserved() {
        let headings = vec![
            h(2, "One"),
            h(3, "One point one"),
            h(2, "Two"),
            h(2, "Three"),
            h(3, "Three point one"),
        ];

        let toc = build_toc(&headings, TocLevels::default());
        assert_eq!(toc.len(), 3);
    }

    #[test]
    fn test_subsections_attach_to_nearest_preceding_section() {
        let headings = vec![
            h(2, "A"),
            h(3, "A.1"),
            h(2, "B"),
        ];

        let toc = build_toc(&headings, TocLevels::default());
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].text, "A");
        assert_eq!(toc[0].children.len(), 1);
        assert_eq!(toc[0].children[0].text, "A.1");
        assert_eq!(toc[1].text, "B");
        assert!(toc[1].children.is_empty());
    }

    #[test]
    fn test_orphan_subsection_is_dropped() {
        let headings = vec![h(3, "Orphan"), h(2, "Section")];

        let toc = build_toc(&headings, TocLevels::default());
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].text, "Section");
        assert!(toc[0].children.is_empty());
    }

    #[test]
    fn test_other_depths_are_ignored() {
        let headings = vec![
            h(1, "Title"),
            h(2, "Section"),
            h(4, "Too deep"),
            h(3, "Subsection"),
            h(6, "Way too deep"),
        ];

        let toc = build_toc(&headings, TocLevels::default());
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children.len(), 1);
        assert_eq!(toc[0].children[0].text, "Subsection");
    }

    #[test]
    fn test_tree_depth_is_bounded_at_two() {
        // Deeper nesting in the document never produces a third level
        let headings = vec![h(2, "S"), h(3, "S.1"), h(4, "S.1.1"), h(5, "S.1.1.1")];

        let toc = build_toc(&headings, TocLevels::default());
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children.len(), 1);
        assert!(toc[0].children[0].children.is_empty());
    }

    #[test]
    fn test_order_is_preserved_at_both_levels() {
        let headings = vec![
            h(2, "First"),
            h(3, "First a"),
            h(3, "First b"),
            h(2, "Second"),
            h(3, "Second a"),
        ];

        let toc = build_toc(&headings, TocLevels::default());
        let top: Vec<&str> = toc.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(top, vec!["First", "Second"]);

        let children: Vec<&str> = toc[0].children.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(children, vec!["First a", "First b"]);
    }

    #[test]
    fn test_builder_is_idempotent() {
        let headings = vec![h(2, "A"), h(3, "A.1"), h(2, "B"), h(3, "B.1"), h(3, "B.2")];

        let first = build_toc(&headings, TocLevels::default());
        let second = build_toc(&headings, TocLevels::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_level_pair() {
        let headings = vec![h(1, "Chapter"), h(2, "Part")];
        let levels = TocLevels {
            section: 1,
            subsection: 2,
        };

        let toc = build_toc(&headings, levels);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children.len(), 1);
    }
}

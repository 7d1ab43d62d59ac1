use std::error::Error;

use crate::toc::{HeadingRecord, TocNode};

/// Common result type for markdown operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// The output of rendering one document body
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Final HTML, after highlighting
    pub html: String,
    /// Flat heading sequence in document order
    pub headings: Vec<HeadingRecord>,
    /// Two-level table-of-contents tree
    pub toc: Vec<TocNode>,
    /// Table of contents as nested navigation markup, empty when disabled
    /// or when the document has no qualifying headings
    pub toc_html: String,
}

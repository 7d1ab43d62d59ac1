pub mod builder;
pub mod headings;
pub mod render;

pub use builder::{build_toc, TocLevels, TocNode};
pub use headings::{extract_headings, HeadingRecord};
pub use render::render_toc_nav;

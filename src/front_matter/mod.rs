pub mod extractor;
pub mod parser;
pub mod types;

// Re-export the most common items for convenience
pub use extractor::{extract_excerpt, extract_title_from_content};
pub use parser::{has_front_matter, parse, parse_raw, split_front_matter};
pub use types::FrontMatter;

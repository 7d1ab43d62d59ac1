pub mod defaults;
pub mod loader;
pub mod permalink;
pub mod types;
pub mod validation;

pub use loader::load_config;
pub use permalink::process_permalink;
pub use types::{CollectionConfig, Config, MarkdownConfig};

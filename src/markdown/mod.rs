pub mod engine;
pub mod renderer;
pub mod syntax;
pub mod types;

pub use renderer::MarkdownRenderer;
pub use types::RenderedDocument;

pub mod renderer;

pub use renderer::LayoutRenderer;

pub mod build;
pub mod clean;
pub mod new;
pub mod serve;

pub use build::handle_build_command;
pub use clean::handle_clean_command;
pub use new::handle_new_command;
pub use serve::handle_serve_command;

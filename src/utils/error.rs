use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for Quillpress operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for Quillpress operations
#[derive(Debug)]
pub enum QuillError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Collection schema violation
    Schema {
        /// Document that failed validation
        path: String,
        /// Offending front matter field
        field: String,
        /// Human-readable reason
        reason: String,
    },
    /// Template processing error
    Template(String),
    /// Front matter parsing error
    FrontMatter(String),
    /// Markdown processing error
    Markdown(String),
    /// File handling error
    File(String),
    /// Preview server error
    Server(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuillError::Io(err) => write!(f, "IO error: {}", err),
            QuillError::Config(msg) => write!(f, "Configuration error: {}", msg),
            QuillError::Schema { path, field, reason } => {
                write!(f, "Schema violation in {}: field '{}' {}", path, field, reason)
            }
            QuillError::Template(msg) => write!(f, "Template error: {}", msg),
            QuillError::FrontMatter(msg) => write!(f, "Front matter error: {}", msg),
            QuillError::Markdown(msg) => write!(f, "Markdown error: {}", msg),
            QuillError::File(msg) => write!(f, "File error: {}", msg),
            QuillError::Server(msg) => write!(f, "Server error: {}", msg),
            QuillError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for QuillError {}

impl From<io::Error> for QuillError {
    fn from(err: io::Error) -> Self {
        QuillError::Io(err)
    }
}

impl From<String> for QuillError {
    fn from(msg: String) -> Self {
        QuillError::Generic(msg)
    }
}

impl From<&str> for QuillError {
    fn from(msg: &str) -> Self {
        QuillError::Generic(msg.to_string())
    }
}

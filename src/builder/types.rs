use std::error::Error;

/// Common boxed result type for build operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

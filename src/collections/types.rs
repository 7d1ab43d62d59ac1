use std::error::Error;

/// Common boxed result type for collections
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

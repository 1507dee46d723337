use crate::error::Error as BooruErr;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BooruErr>;

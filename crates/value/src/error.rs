use thiserror::Error;

/// Result type for value-model operations
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors raised while building a collection from decoded input
#[derive(Error, Debug)]
pub enum ValueError {
    /// The decoded document is not a top-level array of records
    #[error("Expected a top-level array of records, found {0}")]
    NotAnArray(String),
}

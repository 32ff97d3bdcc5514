use thiserror::Error;

/// Result type for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// A record nests deeper than the walk allows
    #[error("Record nests deeper than {limit} levels at '{path}'")]
    DepthExceeded { limit: usize, path: String },

    /// Image key configuration is unusable
    #[error("Invalid image keys: {0}")]
    InvalidConfig(String),
}

impl GalleryError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

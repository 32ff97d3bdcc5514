use taxon_gallery::GalleryError;
use taxon_indexer::IndexerError;
use taxon_query::{FilterMode, QueryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),

    #[error("Path '{path}' is not available for {mode:?} filters")]
    UnknownPath { path: String, mode: FilterMode },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

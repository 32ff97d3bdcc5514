use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Record {record} nests deeper than {limit} levels at '{path}'")]
    DepthExceeded {
        record: usize,
        limit: usize,
        path: String,
    },
}

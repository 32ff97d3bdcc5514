use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Filter index {index} out of range (have {len} filters)")]
    FilterIndexOutOfRange { index: usize, len: usize },

    #[error("Record {record} nests deeper than {limit} levels at '{path}'")]
    DepthExceeded {
        record: usize,
        limit: usize,
        path: String,
    },
}

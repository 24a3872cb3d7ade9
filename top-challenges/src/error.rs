use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopError {
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),
    #[error("locality window radius must be at least 1 (got {0})")]
    InvalidWindowRadius(usize),
    #[error("invalid solution: {0}")]
    InvalidSolution(String),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

pub type TopResult<T> = std::result::Result<T, TopError>;

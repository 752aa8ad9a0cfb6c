//! Graph-model error type.

use thiserror::Error;

/// Errors produced by `bs-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("station number {0} appears more than once in the feed")]
    DuplicateStation(u32),

    #[error("station feed parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BsError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `bs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BsError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `bs-*` crates.
pub type BsResult<T> = Result<T, BsError>;

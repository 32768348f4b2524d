//! Error types for Commitflow

use thiserror::Error;

/// Result type alias for Commitflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Commitflow operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Diff could not be fetched for a pull request
    #[error("Diff fetch error: {0}")]
    DiffFetch(String),

    /// Summarization service call failed
    #[error("Summarization error: {0}")]
    Summarize(String),

    /// Comment could not be created
    #[error("Comment creation error: {0}")]
    CommentCreate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

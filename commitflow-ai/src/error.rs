//! Error types for summarization calls

use thiserror::Error;

/// Result type for summarization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling the summarization service
#[derive(Error, Debug)]
pub enum Error {
    /// No API key was provided
    #[error("OpenAI API key not found. Set OPENAI_API_KEY environment variable \
             or add api_key to ~/.config/commitflow/secrets.toml")]
    MissingApiKey,

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the service
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

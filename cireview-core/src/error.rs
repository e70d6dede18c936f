//! Error types for cireview

use thiserror::Error;

/// Result type alias for cireview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cireview operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key for the generation service
    #[error("GEMINI_API_KEY not configured")]
    MissingApiKey,

    /// The generation service answered with no text
    #[error("Empty Gemini response")]
    EmptyResponse,

    /// The generation service call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

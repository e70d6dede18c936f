//! Error types for GitHub operations

use std::time::Duration;

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a recognized GitHub repository locator
    #[error("Invalid GitHub URL: {0}")]
    NotRecognized(String),

    /// Transport-level failure (DNS, connection, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete within the timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

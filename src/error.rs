//! Error types for the kastlib library.

use thiserror::Error;

/// Main error type for kastlib operations.
#[derive(Error, Debug)]
pub enum KastError {
    /// Backend answered with an HTTP error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O error (reading an upload source).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the login attempt.
    #[error("Login failed: {0}")]
    LoginRejected(String),

    /// A listing entry failed validation at the fetch boundary.
    #[error("Invalid entry in listing: {0}")]
    InvalidEntry(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for kastlib operations.
pub type Result<T> = std::result::Result<T, KastError>;

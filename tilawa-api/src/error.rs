//! Error types for the verse-list provider

use thiserror::Error;

/// Errors that can occur while talking to the AlQuran Cloud API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP transport error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The API answered with a non-200 code in its envelope or status line
    #[error("API returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body did not match the expected JSON shape
    #[error("Response parsing error: {0}")]
    Parse(String),

    /// A multi-edition response did not contain the requested edition
    #[error("Response is missing the {0} edition")]
    MissingEdition(&'static str),

    /// Chapter number outside 1..=114
    #[error("Invalid chapter number: {0}")]
    InvalidChapter(u16),
}

/// Convenience Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

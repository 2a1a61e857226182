//! Error types for the MovieFinder plugin.
//!
//! This module defines the centralized error type [`MovieFinderError`], the
//! [`FetchFailure`] reported by the result fetcher, and a [`Result`] alias used
//! throughout the plugin. All errors are implemented with `thiserror`.

use thiserror::Error;

/// A failed movie search request.
///
/// The core distinguishes exactly one failure kind: any non-2xx response,
/// transport failure, or undecodable body. `status` is the HTTP status the host
/// reported; decoding failures keep the status of the undecodable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request failed with status {status}: {message}")]
pub struct FetchFailure {
    /// HTTP status code reported by the host for the request.
    pub status: u16,

    /// Human-readable reason, taken from the API error body when available.
    pub message: String,
}

impl FetchFailure {
    /// Creates a failure from a status code and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Failure reported for searches the host refused to send.
    pub fn web_access_denied() -> Self {
        Self::new(403, "web access permission denied")
    }
}

/// The main error type for MovieFinder operations.
///
/// # Examples
///
/// ```
/// use moviefinder::MovieFinderError;
///
/// fn validate() -> Result<(), MovieFinderError> {
///     Err(MovieFinderError::Config("api_token is not set".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MovieFinderError {
    /// A search request could not be completed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchFailure),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for MovieFinder operations.
pub type Result<T> = std::result::Result<T, MovieFinderError>;

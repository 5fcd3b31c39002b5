//! Error types for the relay

use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], used to decide what a caller gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upstream data source could not be queried or returned something unusable
    Upstream,
    /// The fetched records could not be filtered or sorted
    Processing,
    /// Startup configuration is invalid
    Config,
}

/// Errors produced by the client, the pipeline and the configuration loader
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured on the client
    #[error("API key not set")]
    MissingApiKey,

    /// The upstream API answered with a non-success status or an error payload
    #[error("upstream API error (status {status}): {message}")]
    ApiError {
        /// Value of the `X-Request-Id` header, if any
        request_id: Option<String>,
        /// HTTP status code
        status: u16,
        /// Response body or upstream error message
        message: String,
    },

    /// Transport failure from the reqwest backend
    #[cfg(feature = "reqwest")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure from any other backend
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The upstream request did not complete in time
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream body was not valid JSON
    #[error("invalid JSON in upstream response: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream body was JSON but not an array of objects
    #[error("unexpected upstream payload: {0}")]
    UnexpectedShape(String),

    /// A record has no usable `date` field
    #[error("record {index} has no string `date` field")]
    MissingDate {
        /// Position of the record in the upstream list
        index: usize,
    },

    /// A record's `date` is not `YYYY-MM-DD`
    #[error("record {index} has invalid date '{value}': {source}")]
    InvalidDate {
        /// Position of the record in the upstream list
        index: usize,
        /// The offending value
        value: String,
        /// Underlying parse error
        #[source]
        source: time::error::Parse,
    },

    /// Values under the sort key cannot be ordered against each other
    #[error("cannot sort by '{field}': {reason}")]
    Unsortable {
        /// Requested sort field
        field: String,
        /// Why the column is not orderable
        reason: String,
    },

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Anything else
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingDate { .. } | Error::InvalidDate { .. } | Error::Unsortable { .. } => {
                ErrorKind::Processing
            }
            Error::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Upstream,
        }
    }
}

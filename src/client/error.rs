//! Error types for the client module.

use thiserror::Error;

use crate::mirror::FetchError;
use crate::parse::ParseError;

/// Errors that can occur in the high-level client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The shared HTTP client could not be constructed, usually because
    /// the configured proxy URL was rejected.
    #[error("failed to build HTTP client: {source}")]
    Init {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The requested format is outside the supported set.
    #[error("invalid book format {format:?}")]
    InvalidFormat {
        /// The rejected format string.
        format: String,
    },

    /// The winning mirror response body could not be read.
    #[error("failed to read response body: {source}")]
    Body {
        /// The underlying transfer error.
        #[source]
        source: reqwest::Error,
    },

    /// No mirror produced a usable response.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The winning response body did not contain the expected page.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ClientError {
    /// Creates a client construction error.
    pub fn init(source: reqwest::Error) -> Self {
        Self::Init { source }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: impl Into<String>) -> Self {
        Self::InvalidFormat {
            format: format.into(),
        }
    }

    /// Creates a body read error.
    pub fn body(source: reqwest::Error) -> Self {
        Self::Body { source }
    }
}

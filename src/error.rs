//! Error types for Reddit API and comment-tree operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while fetching or assembling comment trees.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Configuration is missing or incomplete.
    #[error("Reddit configuration required: {0}")]
    ConfigMissing(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed with a non-success status.
    #[error("Reddit API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// The server accepted the request but rejected it semantically.
    #[error("Reddit API rejected the request: {}", join_faults(.0))]
    ApiRejected(Vec<ApiFault>),

    /// The response JSON does not have the shape the tree builders require.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl RedditError {
    /// Returns true for a 404 from the transport or an already-translated
    /// [`RedditError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::ApiError { status_code, .. } => *status_code == Some(404),
            _ => false,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

/// One entry of a `json.errors` array: `[code, message, field]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFault {
    pub code: String,
    pub message: String,
    pub field: Option<String>,
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({}): {}", self.code, field, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

fn join_faults(faults: &[ApiFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Reddit operations.
pub type Result<T> = core::result::Result<T, RedditError>;

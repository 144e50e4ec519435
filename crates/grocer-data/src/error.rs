//! HTTP client and API error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

/// Failure reported by a network collaborator.
///
/// The display form is the human-readable message that ends up in a store's
/// `error` field and in the error toast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport or server failure.
    #[error("{message}")]
    Network { message: String },

    /// The requested record does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// The server rejected a mutation payload.
    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// Message suitable for display.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message }
            | ApiError::NotFound { message }
            | ApiError::Validation { message } => message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status: 404, message } => ApiError::NotFound { message },
            FetchError::HttpError {
                status: 400 | 409 | 422,
                message,
            } => ApiError::Validation { message },
            FetchError::HttpError { message, .. } => ApiError::Network { message },
            other => ApiError::Network {
                message: other.to_string(),
            },
        }
    }
}

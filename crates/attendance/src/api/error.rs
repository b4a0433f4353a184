//! Error types for calls to the attendance API.

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur while talking to the attendance API.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The API rejected the payload (HTTP 400)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing or rejected bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The requested course does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Server returned an unexpected response
    #[error("Unexpected response ({status}): {message}")]
    UnexpectedResponse { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    UrlError { message: String },

    /// A draft was rejected before it was sent
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Returns true if this error is potentially transient and retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::UnexpectedResponse { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::UrlError {
            message: err.to_string(),
        }
    }
}

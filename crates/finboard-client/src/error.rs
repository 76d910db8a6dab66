//! Error types for finboard-client

use thiserror::Error;

/// The two failure kinds a fetch can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport error or undecodable body
    FetchFailure,
    /// Non-success status code
    HttpError,
}

/// Errors raised while talking to the transactions API.
///
/// `Display` is the user-facing message shown in the error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("{message}")]
    Transport { message: String },

    #[error("{message}")]
    Decode { message: String },

    #[error("Failed to create HTTP client: {message}")]
    Build { message: String },
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Http { .. } => FailureKind::HttpError,
            _ => FailureKind::FetchFailure,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode { message: error.to_string() }
        } else if let Some(status) = error.status() {
            ClientError::Http { status: status.as_u16() }
        } else {
            ClientError::Transport { message: error.to_string() }
        }
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

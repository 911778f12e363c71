//! Client error types
//!
//! Every variant renders as the single message a front end shows to the
//! user; the transport error behind `Network` stays available as the source.

use thiserror::Error;

/// Message shown for any transport-level failure
pub const NETWORK_MESSAGE: &str = "network unavailable";

/// Fallback when a failed response carries neither a body message nor a
/// reason phrase
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before sending
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection refused, DNS, timeout or other I/O failure
    #[error("network unavailable")]
    Network(#[source] reqwest::Error),

    /// 2xx response whose body is not the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Configured base URL cannot be parsed
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// HTTP status of a server rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Caller-visible message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

//! API Error Types
//!
//! Classifies everything that can go wrong talking to the reminder service
//! into a small tagged set, so callers never inspect raw bodies.

use thiserror::Error;

/// Errors returned by the remote reminder and auth endpoints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network unreachable, timeout, or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server refused the request; `message` is its `{error}` field
    #[error("Rejected ({status}): {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, message: Option<String> },

    /// 2xx response whose body does not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Text to show the user: the server's reason verbatim, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transport(format!("service unavailable: {}", err))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

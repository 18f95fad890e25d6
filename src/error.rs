//! Client Error Types
//!
//! Errors surfaced by dashboard and auth operations. Each one maps to the
//! transient message a user sees.

use thiserror::Error;

use crate::api::ApiError;
use crate::ops::Operation;
use crate::session::SessionError;

/// Errors returned by user-initiated operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// No session token; raised before any network call
    #[error("{0}: not logged in")]
    MissingSession(Operation),

    /// The same operation is still in flight
    #[error("{0} already in progress")]
    Busy(Operation),

    /// A required form field is empty or unreadable
    #[error("Invalid {field}: {reason}")]
    InvalidForm { field: &'static str, reason: String },

    /// The remote service failed the request
    #[error("{op} failed: {source}")]
    Api {
        op: Operation,
        #[source]
        source: ApiError,
    },

    /// Session storage could not be read or written
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    pub fn api(op: Operation, source: ApiError) -> Self {
        ClientError::Api { op, source }
    }

    pub fn required(field: &'static str) -> Self {
        ClientError::InvalidForm {
            field,
            reason: "this field is required".to_string(),
        }
    }

    /// Transient message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingSession(op) => op.missing_session_message().to_string(),
            ClientError::Busy(op) => format!("Please wait, {} is still in progress.", op),
            ClientError::InvalidForm { field, reason } => format!("{}: {}", field, reason),
            ClientError::Api { op, source } => source.user_message(op.fallback_message()),
            ClientError::Session(e) => e.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_operation() {
        let err = ClientError::MissingSession(Operation::FetchReminders);
        assert_eq!(err.to_string(), "fetch reminders: not logged in");
        let err = ClientError::Busy(Operation::Login);
        assert_eq!(err.to_string(), "login already in progress");
    }

    #[test]
    fn test_user_messages() {
        let err = ClientError::MissingSession(Operation::DeleteReminder);
        assert_eq!(err.user_message(), "You must be logged in to delete reminders.");

        let err = ClientError::api(
            Operation::CreateReminder,
            ApiError::Rejected {
                status: 400,
                message: Some("remind_at must be in the future".to_string()),
            },
        );
        assert_eq!(err.user_message(), "remind_at must be in the future");

        let err = ClientError::api(
            Operation::FetchReminders,
            ApiError::Transport("connection reset".to_string()),
        );
        assert_eq!(err.user_message(), "Failed to fetch reminders.");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Busy(Operation::CreateReminder);
        assert_eq!(err.to_string(), "create reminder already in progress");

        let err = ClientError::required("title");
        assert_eq!(err.to_string(), "Invalid title: this field is required");
    }
}

//! Reminder Service API
//!
//! Client side of the remote reminder service. The service itself is
//! external; this module only consumes it.
//!
//! # Endpoints
//!
//! ## Reminders (bearer token)
//! - `GET /reminders` - List reminders
//! - `POST /reminders` - Create a reminder
//! - `DELETE /reminders/:id` - Delete a reminder
//!
//! ## Auth
//! - `POST /auth/login` - Exchange credentials for a token
//! - `POST /auth/signup` - Register an account
//! - `POST /auth/forgot-password` - Mail a reset link
//! - `POST /auth/reset-password` - Set a new password with a reset token
//!
//! Every failure body is expected as `{"error": "..."}`.

pub mod client;
pub mod dto;
pub mod error;
pub mod response;

pub use client::{ClientConfig, HttpClient, DEFAULT_BASE_URL};
pub use dto::{
    ErrorBody, ForgotPasswordRequest, LoginRequest, LoginResponse, ReminderDraft,
    ResetPasswordRequest, SignupRequest,
};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::model::{Reminder, ReminderId, SessionToken};

/// Reminder endpoints, all authenticated with a bearer token
#[async_trait]
pub trait ReminderApi: Send + Sync {
    async fn list_reminders(&self, token: &SessionToken) -> ApiResult<Vec<Reminder>>;

    async fn create_reminder(&self, token: &SessionToken, draft: &ReminderDraft) -> ApiResult<()>;

    async fn delete_reminder(&self, token: &SessionToken, id: ReminderId) -> ApiResult<()>;
}

/// Unauthenticated account endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    async fn signup(&self, request: &SignupRequest) -> ApiResult<()>;

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiResult<()>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()>;
}

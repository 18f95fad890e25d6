//! Data Transfer Objects
//!
//! Request and response bodies for the reminder and auth endpoints.

use serde::{Deserialize, Serialize};

use crate::model::User;

// ============================================
// REMINDER DTOs
// ============================================

/// Body of `POST /reminders`.
///
/// Fields are only reachable through [`ReminderDraft::new`], which refuses
/// empty values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderDraft {
    title: String,
    description: String,
    remind_at: String,
}

impl ReminderDraft {
    /// Build a draft, naming the first empty field on failure
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        remind_at: impl Into<String>,
    ) -> Result<Self, &'static str> {
        let draft = Self {
            title: title.into(),
            description: description.into(),
            remind_at: remind_at.into(),
        };
        if draft.title.trim().is_empty() {
            return Err("title");
        }
        if draft.description.trim().is_empty() {
            return Err("description");
        }
        if draft.remind_at.trim().is_empty() {
            return Err("remind_at");
        }
        Ok(draft)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn remind_at(&self) -> &str {
        &self.remind_at
    }
}

// ============================================
// AUTH DTOs
// ============================================

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `POST /auth/signup`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Body of `POST /auth/forgot-password`
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /auth/reset-password`
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

// ============================================
// ERROR DTO
// ============================================

/// Failure body every endpoint is expected to use
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

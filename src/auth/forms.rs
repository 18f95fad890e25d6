//! Auth Forms
//!
//! Client-side validation for the account screens. A form only produces a
//! request body once every required field is filled in.

use crate::api::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest};
use crate::error::{ClientError, ClientResult};

fn required(field: &'static str, value: &str) -> ClientResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::required(field));
    }
    Ok(value.to_string())
}

/// Passwords are sent exactly as typed
fn required_secret(field: &'static str, value: &str) -> ClientResult<String> {
    if value.is_empty() {
        return Err(ClientError::required(field));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ClientResult<LoginRequest> {
        Ok(LoginRequest {
            email: required("email", &self.email)?,
            password: required_secret("password", &self.password)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> ClientResult<SignupRequest> {
        Ok(SignupRequest {
            name: required("name", &self.name)?,
            email: required("email", &self.email)?,
            phone: required("phone", &self.phone)?,
            password: required_secret("password", &self.password)?,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> ClientResult<ForgotPasswordRequest> {
        Ok(ForgotPasswordRequest {
            email: required("email", &self.email)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    /// Reset token from the emailed link
    pub token: String,
    pub new_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> ClientResult<ResetPasswordRequest> {
        Ok(ResetPasswordRequest {
            token: required("token", &self.token)?,
            new_password: required_secret("new_password", &self.new_password)?,
        })
    }
}

/// Pull the reset token out of a pasted link, or accept a bare token.
///
/// `https://app/reset-password?token=abc%2B1` yields `abc+1`.
pub fn token_from_reset_link(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let Some((_, query)) = input.split_once('?') else {
        // No query string: a bare token, unless it is clearly a URL
        return (!input.contains("://")).then(|| input.to_string());
    };

    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "token")
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|token| !token.is_empty())
}

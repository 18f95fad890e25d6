//! HTTP API Client
//!
//! Functions for communicating with the reminder REST API.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::state::Reminder;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://reminder-kfwt.onrender.com";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item("chime_api_url").ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Errors ============

/// Why a call failed
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network failure or unreadable body
    Transport(String),
    /// Non-2xx, or an error-shaped 2xx; `message` is the `{error}` field
    Rejected { status: u16, message: Option<String> },
    /// 2xx with an unexpected shape
    Malformed(String),
}

impl ApiError {
    /// The server's reason verbatim, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Malformed(detail) => {
                web_sys::console::warn_1(&format!("Malformed response: {}", detail).into());
                fallback.to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

fn error_field(value: &Value) -> Option<String> {
    value.get("error")?.as_str().map(str::to_string)
}

/// Classify a response body
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let success = (200..300).contains(&status);

    if !success {
        return Err(ApiError::Rejected {
            status,
            message: parsed.as_ref().and_then(error_field),
        });
    }

    let value = parsed.ok_or_else(|| ApiError::Malformed("body is not JSON".to_string()))?;
    match T::deserialize(&value) {
        Ok(decoded) => Ok(decoded),
        Err(e) => match error_field(&value) {
            Some(message) => Err(ApiError::Rejected {
                status,
                message: Some(message),
            }),
            None => Err(ApiError::Malformed(e.to_string())),
        },
    }
}

/// Any 2xx is success, whatever the body
pub fn decode_ack(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_field);
    Err(ApiError::Rejected { status, message })
}

async fn send(request: Result<Request, gloo_net::Error>) -> Result<(u16, String), ApiError> {
    let request = request.map_err(|e| ApiError::Transport(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(format!("Network error: {}", e)))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, body))
}

fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

// ============ Reminders ============

/// GET /reminders
pub async fn fetch_reminders(token: &str) -> Result<Vec<Reminder>, ApiError> {
    let url = format!("{}/reminders", get_api_base());
    let (status, body) = send(authed(Request::get(&url), token).build()).await?;
    decode(status, &body)
}

/// POST /reminders
pub async fn create_reminder(
    token: &str,
    title: &str,
    description: &str,
    remind_at: &str,
) -> Result<(), ApiError> {
    let url = format!("{}/reminders", get_api_base());
    let body = json!({
        "title": title,
        "description": description,
        "remind_at": remind_at,
    });
    let (status, body) = send(authed(Request::post(&url), token).json(&body)).await?;
    decode_ack(status, &body)
}

/// DELETE /reminders/{id}
pub async fn delete_reminder(token: &str, id: i64) -> Result<(), ApiError> {
    let url = format!("{}/reminders/{}", get_api_base(), id);
    let (status, body) = send(authed(Request::delete(&url), token).build()).await?;
    decode_ack(status, &body)
}

// ============ Auth ============

#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
}

/// POST /auth/login
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let url = format!("{}/auth/login", get_api_base());
    let body = json!({ "email": email, "password": password });
    let (status, body) = send(Request::post(&url).json(&body)).await?;
    decode(status, &body)
}

/// POST /auth/signup
pub async fn signup(name: &str, email: &str, phone: &str, password: &str) -> Result<(), ApiError> {
    let url = format!("{}/auth/signup", get_api_base());
    let body = json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": password,
    });
    let (status, body) = send(Request::post(&url).json(&body)).await?;
    decode_ack(status, &body)
}

/// POST /auth/forgot-password
pub async fn forgot_password(email: &str) -> Result<(), ApiError> {
    let url = format!("{}/auth/forgot-password", get_api_base());
    let (status, body) = send(Request::post(&url).json(&json!({ "email": email }))).await?;
    decode_ack(status, &body)
}

/// POST /auth/reset-password
pub async fn reset_password(token: &str, new_password: &str) -> Result<(), ApiError> {
    let url = format!("{}/auth/reset-password", get_api_base());
    let body = json!({ "token": token, "newPassword": new_password });
    let (status, body) = send(Request::post(&url).json(&body)).await?;
    decode_ack(status, &body)
}

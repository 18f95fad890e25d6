//! Reminder Service REST Client
//!
//! HTTP client for the remote reminder and auth endpoints.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

use super::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ReminderDraft, ResetPasswordRequest,
    SignupRequest,
};
use super::error::{ApiError, ApiResult};
use super::response::{decode, decode_ack};
use super::{AuthApi, ReminderApi};
use crate::model::{Reminder, ReminderId, SessionToken};

/// Default location of the hosted reminder service
pub const DEFAULT_BASE_URL: &str = "https://reminder-kfwt.onrender.com";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://reminder-kfwt.onrender.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// REST client implementing both [`ReminderApi`] and [`AuthApi`]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&SessionToken>) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Send a request and hand back status plus raw body
    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<(u16, Vec<u8>)> {
        let span = tracing::debug_span!(
            "api_request",
            method = %method,
            path = %path,
            request_id = %uuid::Uuid::new_v4(),
        );

        async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            tracing::debug!(status, bytes = body.len(), "response received");
            Ok::<_, ApiError>((status, body.to_vec()))
        }
        .instrument(span)
        .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let (status, body) = self.execute(method, path, builder).await?;
        decode(status, &body)
    }

    async fn ack(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<()> {
        let (status, body) = self.execute(method, path, builder).await?;
        decode_ack(status, &body)
    }
}

#[async_trait]
impl ReminderApi for HttpClient {
    async fn list_reminders(&self, token: &SessionToken) -> ApiResult<Vec<Reminder>> {
        let builder = self.request(Method::GET, "/reminders", Some(token));
        self.fetch(Method::GET, "/reminders", builder).await
    }

    async fn create_reminder(&self, token: &SessionToken, draft: &ReminderDraft) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/reminders", Some(token))
            .json(draft);
        self.ack(Method::POST, "/reminders", builder).await
    }

    async fn delete_reminder(&self, token: &SessionToken, id: ReminderId) -> ApiResult<()> {
        let path = format!("/reminders/{}", id);
        let builder = self.request(Method::DELETE, &path, Some(token));
        self.ack(Method::DELETE, &path, builder).await
    }
}

#[async_trait]
impl AuthApi for HttpClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self.request(Method::POST, "/auth/login", None).json(request);
        self.fetch(Method::POST, "/auth/login", builder).await
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<()> {
        let builder = self.request(Method::POST, "/auth/signup", None).json(request);
        self.ack(Method::POST, "/auth/signup", builder).await
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/auth/forgot-password", None)
            .json(request);
        self.ack(Method::POST, "/auth/forgot-password", builder).await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/auth/reset-password", None)
            .json(request);
        self.ack(Method::POST, "/auth/reset-password", builder).await
    }
}

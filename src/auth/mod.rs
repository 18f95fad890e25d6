//! Account Flows
//!
//! Login, signup, forgot-password and reset-password. Each is a single
//! request/response cycle; only login touches the session store.

mod forms;

pub use forms::{
    token_from_reset_link, ForgotPasswordForm, LoginForm, ResetPasswordForm, SignupForm,
};

use std::sync::Arc;

use crate::api::{ApiError, AuthApi};
use crate::error::{ClientError, ClientResult};
use crate::model::{Session, SessionToken};
use crate::ops::{InFlight, InFlightGuard, Operation};
use crate::session::SessionStore;

/// Runs the account forms against the auth endpoints
pub struct AuthFlow {
    api: Arc<dyn AuthApi>,
    session: SessionStore,
    in_flight: InFlight,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn AuthApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            in_flight: InFlight::new(),
        }
    }

    fn begin(&self, op: Operation) -> ClientResult<InFlightGuard> {
        self.in_flight.try_begin(op).ok_or(ClientError::Busy(op))
    }

    /// Exchange credentials for a token and persist the session
    pub async fn login(&self, form: &LoginForm) -> ClientResult<Session> {
        let op = Operation::Login;
        let request = form.validate()?;
        let _guard = self.begin(op)?;

        let response = self
            .api
            .login(&request)
            .await
            .map_err(|e| failed(op, e))?;

        if response.token.is_empty() {
            return Err(failed(
                op,
                ApiError::Malformed("login response carried an empty token".to_string()),
            ));
        }

        let session = Session::new(SessionToken::new(response.token), response.user);
        self.session.save(&session)?;
        tracing::info!(user = ?session.display_name(), "Logged in");
        Ok(session)
    }

    /// Register an account. The caller clears the form and moves to login.
    pub async fn signup(&self, form: &SignupForm) -> ClientResult<()> {
        let op = Operation::Signup;
        let request = form.validate()?;
        let _guard = self.begin(op)?;

        self.api.signup(&request).await.map_err(|e| failed(op, e))?;
        tracing::info!(email = %request.email, "Account created");
        Ok(())
    }

    /// Ask the service to mail a reset link
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> ClientResult<()> {
        let op = Operation::ForgotPassword;
        let request = form.validate()?;
        let _guard = self.begin(op)?;

        self.api
            .forgot_password(&request)
            .await
            .map_err(|e| failed(op, e))?;
        tracing::info!(email = %request.email, "Reset link requested");
        Ok(())
    }

    /// Set a new password using the token from the reset link
    pub async fn reset_password(&self, form: &ResetPasswordForm) -> ClientResult<()> {
        let op = Operation::ResetPassword;
        let request = form.validate()?;
        let _guard = self.begin(op)?;

        self.api
            .reset_password(&request)
            .await
            .map_err(|e| failed(op, e))?;
        tracing::info!("Password reset");
        Ok(())
    }

    /// Forget the stored token and profile
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Session restored from storage, if any
    pub fn current_session(&self) -> ClientResult<Option<Session>> {
        Ok(self.session.load()?)
    }
}

fn failed(op: Operation, e: ApiError) -> ClientError {
    match &e {
        ApiError::Malformed(detail) => tracing::warn!(operation = %op, detail = %detail, "Malformed response"),
        other => tracing::warn!(operation = %op, error = %other, "Request failed"),
    }
    ClientError::api(op, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAuthApi;

    fn flow() -> (Arc<FakeAuthApi>, SessionStore, AuthFlow) {
        let api = Arc::new(FakeAuthApi::new());
        let session = SessionStore::in_memory();
        let flow = AuthFlow::new(api.clone(), session.clone());
        (api, session, flow)
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "ada@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let (_, session, flow) = flow();

        let logged_in = flow.login(&login_form("correct horse")).await.unwrap();
        assert_eq!(logged_in.display_name(), Some("Ada"));

        // A later dashboard load finds the session without asking again
        let restored = session.load().unwrap().unwrap();
        assert_eq!(restored.token.as_str(), "good-token");
        assert_eq!(restored.display_name(), Some("Ada"));
        assert_eq!(flow.current_session().unwrap(), Some(restored));
    }

    #[tokio::test]
    async fn test_bad_login_shows_server_message_and_stores_nothing() {
        let (_, session, flow) = flow();

        let err = flow.login(&login_form("wrong")).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(session.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_never_hits_network() {
        let (api, _, flow) = flow();
        let err = flow.login(&login_form("")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidForm { field: "password", .. }));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_token_is_malformed() {
        let (api, session, flow) = flow();
        api.issue_empty_token();

        let err = flow.login(&login_form("correct horse")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api {
                source: ApiError::Malformed(_),
                ..
            }
        ));
        assert_eq!(err.user_message(), "Login failed");
        assert!(session.token().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_and_reset_messages() {
        let (_, _, flow) = flow();

        let form = SignupForm {
            name: "Grace".to_string(),
            email: "taken@example.com".to_string(),
            phone: "555-0100".to_string(),
            password: "pw".to_string(),
        };
        let err = flow.signup(&form).await.unwrap_err();
        assert_eq!(err.user_message(), "User already exists");

        let form = SignupForm {
            email: "grace@example.com".to_string(),
            ..form
        };
        flow.signup(&form).await.unwrap();

        flow.forgot_password(&ForgotPasswordForm {
            email: "grace@example.com".to_string(),
        })
        .await
        .unwrap();

        let err = flow
            .reset_password(&ResetPasswordForm {
                token: "old".to_string(),
                new_password: "n3w".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid or expired token");

        flow.reset_password(&ResetPasswordForm {
            token: "reset-123".to_string(),
            new_password: "n3w".to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback() {
        let (api, _, flow) = flow();
        api.go_offline();

        let err = flow
            .forgot_password(&ForgotPasswordForm {
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to send reset link");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (_, session, flow) = flow();
        flow.login(&login_form("correct horse")).await.unwrap();
        flow.logout().unwrap();
        assert!(session.load().unwrap().is_none());
    }
}

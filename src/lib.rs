//! # Chime
//!
//! Reminder client - sign in, keep a list of time-based reminders on the
//! hosted reminder service, and get a sound cue when one comes due.
//!
//! ## Features
//!
//! - **Session store**: token and profile survive restarts, cleared on logout
//! - **Dashboard controller**: fetch / create / confirmed delete, with
//!   per-operation in-flight flags and last-issued-wins fetch ordering
//! - **Due-time cues**: each reminder rings once per user while it is within
//!   a minute of now
//! - **Account flows**: login, signup, forgot and reset password
//!
//! ## Modules
//!
//! - [`api`]: REST client for the reminder and auth endpoints
//! - [`session`]: Persistent session store
//! - [`dashboard`]: Reminder lifecycle controller, form and picker
//! - [`notify`]: Fulfillment tracker and sound players
//! - [`auth`]: Account forms and flows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chime::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = Arc::new(HttpClient::new(config.api.client_config())?);
//!     let session = SessionStore::in_dir(&config.session.data_dir);
//!
//!     // Log in once; the token is persisted
//!     let auth = AuthFlow::new(client.clone(), session.clone());
//!     auth.login(&LoginForm {
//!         email: "ada@example.com".into(),
//!         password: "correct horse".into(),
//!     })
//!     .await?;
//!
//!     // Load the dashboard
//!     let dashboard = ReminderController::new(
//!         client,
//!         session,
//!         build_player(&config.sound),
//!         config.notify.window(),
//!     );
//!     dashboard.refresh().await?;
//!     println!("{} reminders", dashboard.state().reminders.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod notify;
pub mod ops;
pub mod session;
pub mod telemetry;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{
    ApiError, ApiResult, AuthApi, ClientConfig, HttpClient, ReminderApi, ReminderDraft,
};

pub use auth::{
    token_from_reset_link, AuthFlow, ForgotPasswordForm, LoginForm, ResetPasswordForm,
    SignupForm,
};

pub use config::{Config, ConfigError, LoggingConfig, PlayerKind, SoundConfig};

pub use dashboard::{
    parse_remind_at, DashboardState, DeleteConfirmation, ReminderController, ReminderForm,
    Toast, ToastKind,
};

pub use error::{ClientError, ClientResult};

pub use model::{Reminder, ReminderId, Session, SessionToken, User};

pub use notify::{build_player, FulfillmentTracker, Sound, SoundPlayer};

pub use ops::Operation;

pub use session::{SessionError, SessionStore};

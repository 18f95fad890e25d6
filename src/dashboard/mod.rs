//! Reminder Dashboard
//!
//! - **Controller**: fetch / create / delete plus the due-time scan
//! - **State**: the renderable snapshot and its toasts
//! - **Form**: create-reminder draft and the date/time picker
//! - **Confirm**: the two-step delete gate

mod confirm;
mod controller;
mod form;
mod state;

pub use confirm::{DeleteConfirmation, DIALOG_MESSAGE, DIALOG_TITLE};
pub use controller::ReminderController;
pub use form::{parse_remind_at, ReminderForm};
pub use state::{DashboardState, Toast, ToastKind};

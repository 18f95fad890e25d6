//! User-Initiated Operations
//!
//! Names every operation a client can trigger, the messages tied to it,
//! and the in-flight flags that stop an operation from being re-entered.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Operations a user can trigger from a form or the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchReminders,
    CreateReminder,
    DeleteReminder,
    Login,
    Signup,
    ForgotPassword,
    ResetPassword,
}

impl Operation {
    /// Message shown when the operation fails without a server-provided reason
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchReminders => "Failed to fetch reminders.",
            Operation::CreateReminder => "Failed to create reminder",
            Operation::DeleteReminder => "Failed to delete reminder",
            Operation::Login => "Login failed",
            Operation::Signup => "Signup failed",
            Operation::ForgotPassword => "Failed to send reset link",
            Operation::ResetPassword => "Failed to reset password",
        }
    }

    /// Message shown when the operation needs a session and none is stored
    pub fn missing_session_message(self) -> &'static str {
        match self {
            Operation::CreateReminder => "Please register or login first.",
            Operation::DeleteReminder => "You must be logged in to delete reminders.",
            _ => "You must be logged in to view / add reminders.",
        }
    }

    /// Message shown when the operation succeeds; a fetch shows none
    pub fn success_message(self) -> Option<&'static str> {
        let message = match self {
            Operation::FetchReminders => return None,
            Operation::CreateReminder => "Reminder created successfully!",
            Operation::DeleteReminder => "Reminder deleted successfully!",
            Operation::Login => "Login successful! Redirecting...",
            Operation::Signup => "Signup successful! Redirecting to login...",
            Operation::ForgotPassword => "Password reset link sent! Check your email.",
            Operation::ResetPassword => "Password reset successful! Redirecting to login...",
        };
        Some(message)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchReminders => "fetch reminders",
            Operation::CreateReminder => "create reminder",
            Operation::DeleteReminder => "delete reminder",
            Operation::Login => "login",
            Operation::Signup => "signup",
            Operation::ForgotPassword => "forgot password",
            Operation::ResetPassword => "reset password",
        };
        f.write_str(name)
    }
}

/// Per-operation in-flight flags.
///
/// `try_begin` hands out a guard while the operation is idle and refuses
/// while it is running. Dropping the guard marks the operation idle again.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    running: Arc<Mutex<HashSet<Operation>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `op` as running, or return `None` if it already is
    pub fn try_begin(&self, op: Operation) -> Option<InFlightGuard> {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if running.insert(op) {
            Some(InFlightGuard {
                running: Arc::clone(&self.running),
                op,
            })
        } else {
            None
        }
    }

    pub fn is_running(&self, op: Operation) -> bool {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&op)
    }
}

/// Releases its operation's in-flight flag when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    running: Arc<Mutex<HashSet<Operation>>>,
    op: Operation,
}

impl InFlightGuard {
    pub fn operation(&self) -> Operation {
        self.op
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.op);
    }
}

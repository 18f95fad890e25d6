//! Dashboard State
//!
//! Cloneable snapshot of everything the dashboard renders.

use serde::Serialize;

use super::form::ReminderForm;
use crate::model::{Reminder, ReminderId};

/// Kind of transient message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient success or error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
        }
    }
}

/// What the dashboard shows right now
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Snapshot of the last successful fetch
    pub reminders: Vec<Reminder>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub user_name: Option<String>,
    /// Reminder awaiting delete confirmation; the dialog is open while set
    pub pending_delete: Option<ReminderId>,
    pub draft: ReminderForm,
}

impl DashboardState {
    /// Toasts to render, error first
    pub fn toasts(&self) -> Vec<Toast> {
        let mut toasts = Vec::new();
        if let Some(message) = self.error.as_deref().filter(|m| !m.is_empty()) {
            toasts.push(Toast::error(message));
        }
        if let Some(message) = self.success.as_deref().filter(|m| !m.is_empty()) {
            toasts.push(Toast::success(message));
        }
        toasts
    }

    pub fn is_dialog_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn find(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub(crate) fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_render_nothing() {
        let mut state = DashboardState::default();
        assert!(state.toasts().is_empty());

        state.success = Some(String::new());
        assert!(state.toasts().is_empty());

        state.error = Some("Failed to fetch reminders.".to_string());
        state.success = Some("Reminder created successfully!".to_string());
        let toasts = state.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].icon(), "✕");
        assert_eq!(toasts[1].icon(), "✓");
    }
}

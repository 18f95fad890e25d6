//! Delete Confirmation
//!
//! Two-step gate in front of the delete endpoint: a reminder is selected,
//! then the selection is either confirmed or dismissed.

use crate::model::ReminderId;

/// Dialog heading
pub const DIALOG_TITLE: &str = "Delete Reminder?";
/// Dialog body
pub const DIALOG_MESSAGE: &str =
    "Are you sure you want to delete this reminder? This action cannot be undone.";

/// Pending delete target. The dialog is open exactly while one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pending: Option<ReminderId>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a reminder and open the dialog; replaces any earlier selection
    pub fn request(&mut self, id: ReminderId) {
        self.pending = Some(id);
    }

    /// Cancel or dismiss. Returns the dropped selection.
    pub fn cancel(&mut self) -> Option<ReminderId> {
        self.pending.take()
    }

    /// Confirm. Yields the target once; `None` when nothing was selected.
    pub fn take(&mut self) -> Option<ReminderId> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<ReminderId> {
        self.pending
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

//! Terminal Rendering
//!
//! Plain-text versions of the dashboard pieces: toasts, the reminder list
//! and the delete dialog.

use chrono::{DateTime, Local, Utc};

use crate::dashboard::{Toast, DIALOG_MESSAGE, DIALOG_TITLE};
use crate::model::Reminder;

/// `✓ message` or `✕ message`; empty messages render as nothing
pub fn render_toast(toast: &Toast) -> Option<String> {
    if toast.message.is_empty() {
        return None;
    }
    Some(format!("{} {}", toast.icon(), toast.message))
}

/// Delete dialog text plus the prompt suffix
pub fn render_dialog() -> String {
    format!("{}\n{}\nDelete? [y/N] ", DIALOG_TITLE, DIALOG_MESSAGE)
}

/// Whether a prompt answer confirms; anything but yes dismisses
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// "in 5m", "3h ago", "now"
pub fn format_relative(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (due - now).num_seconds();
    let span = format_span(delta.unsigned_abs());
    match delta {
        d if d.abs() < 1 => "now".to_string(),
        d if d > 0 => format!("in {}", span),
        _ => format!("{} ago", span),
    }
}

fn format_span(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

/// Reminder list as a fixed-width table
pub fn render_table(reminders: &[Reminder], now: DateTime<Utc>) -> String {
    if reminders.is_empty() {
        return "No reminders yet.\n\nCreate one with:\n  chime create --title Tea --description \"Steep\" --at +5m\n".to_string();
    }

    let mut out = format!(
        "{:<6} {:<20} {:<12} {:<24} {}\n",
        "ID", "Due", "When", "Title", "Description"
    );
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for reminder in reminders {
        let (due, when) = match reminder.due_at() {
            Some(at) => (
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
                format_relative(at, now),
            ),
            None => (reminder.remind_at.clone(), "?".to_string()),
        };
        out.push_str(&format!(
            "{:<6} {:<20} {:<12} {:<24} {}\n",
            reminder.id,
            due,
            when,
            truncate(&reminder.title, 24),
            reminder.description
        ));
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

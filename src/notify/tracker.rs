//! Due-Time Tracker
//!
//! Decides which reminders should ring right now, and remembers the ones
//! that already did so each reminder rings at most once per user.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;

use crate::model::{Reminder, ReminderId};

/// Reminders within this distance of "now", before or after, are due
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Fulfilled-notification set plus the identity it belongs to
#[derive(Debug, Clone)]
pub struct FulfillmentTracker {
    window_ms: i64,
    fulfilled: HashSet<ReminderId>,
    identity: Option<String>,
}

impl Default for FulfillmentTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FulfillmentTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: i64::try_from(window.as_millis()).unwrap_or(i64::MAX),
            fulfilled: HashSet::new(),
            identity: None,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    /// Record the displayed user. Any change, including the first login,
    /// empties the set. Returns whether a reset happened.
    pub fn observe_identity(&mut self, identity: Option<&str>) -> bool {
        if self.identity.as_deref() == identity {
            return false;
        }
        self.identity = identity.map(str::to_string);
        self.fulfilled.clear();
        true
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// `|remind_at - now| < window`. Unreadable timestamps are never due.
    pub fn is_due(&self, reminder: &Reminder, now: DateTime<Utc>) -> bool {
        reminder
            .due_at()
            .map(|due| (due - now).num_milliseconds().abs() < self.window_ms)
            .unwrap_or(false)
    }

    /// Mark every due, not-yet-rung reminder as fulfilled and return the
    /// ids in list order. The caller plays one cue per returned id.
    pub fn scan(&mut self, reminders: &[Reminder], now: DateTime<Utc>) -> Vec<ReminderId> {
        let mut rung = Vec::new();
        for reminder in reminders {
            if self.fulfilled.contains(&reminder.id) || !self.is_due(reminder, now) {
                continue;
            }
            self.fulfilled.insert(reminder.id);
            rung.push(reminder.id);
        }
        rung
    }

    pub fn contains(&self, id: ReminderId) -> bool {
        self.fulfilled.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.fulfilled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fulfilled.is_empty()
    }
}

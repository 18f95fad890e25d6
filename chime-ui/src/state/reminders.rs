//! Reminder Bookkeeping
//!
//! The reminder record, the due-time tracker and the fetch ordering used by
//! the dashboard page.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashSet;

/// Due window in milliseconds, either side of now
pub const WINDOW_MS: i64 = 60_000;

/// A reminder as the service returns it
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub remind_at: String,
}

impl Reminder {
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.remind_at)
    }

    /// Due time in the browser's locale, or the raw string if unreadable
    pub fn display_time(&self) -> String {
        self.due_at()
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%b %-d, %Y %-I:%M:%S %p")
                    .to_string()
            })
            .unwrap_or_else(|| self.remind_at.clone())
    }
}

/// RFC 3339, or naive `T`- or space-separated ISO-8601 read as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Reminder ids that already rang, scoped to one user
#[derive(Clone, Debug, Default)]
pub struct FulfillmentTracker {
    fulfilled: HashSet<i64>,
    identity: Option<String>,
}

impl FulfillmentTracker {
    /// Any change of user, including the first login, empties the set
    pub fn observe_identity(&mut self, identity: Option<&str>) {
        if self.identity.as_deref() != identity {
            self.identity = identity.map(str::to_string);
            self.fulfilled.clear();
        }
    }

    /// Record and return the ids that are due now and have not rung yet
    pub fn scan(&mut self, reminders: &[Reminder], now: DateTime<Utc>) -> Vec<i64> {
        let mut rung = Vec::new();
        for reminder in reminders {
            let due = reminder
                .due_at()
                .map(|at| (at - now).num_milliseconds().abs() < WINDOW_MS)
                .unwrap_or(false);
            if due && self.fulfilled.insert(reminder.id) {
                rung.push(reminder.id);
            }
        }
        rung
    }
}

/// Numbers fetches as they are issued; only the newest outcome is applied
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchSequence {
    issued: u64,
    applied: u64,
}

impl FetchSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether the response for `seq` should be applied; marks it applied
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    /// Whether a newer fetch is still outstanding
    pub fn pending_after(&self, seq: u64) -> bool {
        seq < self.issued
    }

    /// Drop every outstanding fetch (logout)
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.applied = self.issued;
    }
}

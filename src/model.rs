//! Domain Types
//!
//! Reminders, users and sessions as the remote service hands them out.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Server-assigned reminder identifier
pub type ReminderId = i64;

/// A reminder record owned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    /// Due time exactly as the server reported it
    pub remind_at: String,
}

impl Reminder {
    /// Parsed due time, if the server's timestamp is readable
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.remind_at)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// which is read as UTC.
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

/// Format a timestamp the way the reminder API stores it
/// (`2025-01-31T09:30:00.000Z`).
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Profile of the logged-in user.
///
/// Only `name` is interpreted; every other field is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: HashMap::new(),
        }
    }
}

/// Opaque bearer credential issued by the auth service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// An authenticated session: token plus the cached profile
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: SessionToken, user: Option<User>) -> Self {
        Self { token, user }
    }

    /// Name shown on the dashboard, if a profile is cached
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

//! Create-Reminder Form and Date/Time Picker
//!
//! The form keeps uncommitted input. The picker turns whatever the user
//! typed into the timestamp format the reminder service stores.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::api::ReminderDraft;
use crate::error::{ClientError, ClientResult};
use crate::model::format_timestamp;

/// Uncommitted create-reminder input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderForm {
    pub title: String,
    pub description: String,
    /// Picker output, `YYYY-MM-DDTHH:MM:SS.sssZ`
    pub remind_at: String,
}

impl ReminderForm {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        remind_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            remind_at: remind_at.into(),
        }
    }

    /// Validated request body. Every field is required.
    pub fn to_draft(&self) -> ClientResult<ReminderDraft> {
        ReminderDraft::new(&self.title, &self.description, &self.remind_at)
            .map_err(ClientError::required)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.remind_at.is_empty()
    }
}

fn relative_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:\+|in\s+)(\d+)\s*(s|secs?|seconds?|m|mins?|minutes?|h|hrs?|hours?|d|days?)$",
        )
        .expect("relative time pattern is valid")
    })
}

/// Parse a picker expression into an API timestamp.
///
/// Accepted forms:
/// - `now`
/// - RFC 3339 (`2025-06-01T09:30:00Z`, `2025-06-01T09:30:00+02:00`)
/// - local wall-clock time (`2025-06-01 09:30`, `2025-06-01T09:30:15`)
/// - relative offsets (`+30s`, `+5m`, `in 2 hours`, `+1d`)
pub fn parse_remind_at(input: &str, now: DateTime<Utc>) -> ClientResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ClientError::required("remind_at"));
    }
    if input.eq_ignore_ascii_case("now") {
        return Ok(format_timestamp(now));
    }

    if let Some(caps) = relative_pattern().captures(input) {
        let amount: i64 = caps[1].parse().map_err(|_| invalid(input))?;
        let offset = match caps[2].chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('s') => Duration::try_seconds(amount),
            Some('m') => Duration::try_minutes(amount),
            Some('h') => Duration::try_hours(amount),
            _ => Duration::try_days(amount),
        }
        .ok_or_else(|| invalid(input))?;
        let at = now.checked_add_signed(offset).ok_or_else(|| invalid(input))?;
        return Ok(format_timestamp(at));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(format_timestamp(dt.with_timezone(&Utc)));
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| invalid(input))?;

    // Skipped wall-clock times (DST gaps) have no instant to map to
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| invalid(input))?;
    Ok(format_timestamp(local.with_timezone(&Utc)))
}

fn invalid(input: &str) -> ClientError {
    ClientError::InvalidForm {
        field: "remind_at",
        reason: format!(
            "cannot read '{}' as a time (try 'now', '+5m', '2025-06-01 09:30' or RFC 3339)",
            input
        ),
    }
}

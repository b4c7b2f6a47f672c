use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle state of a time entry. Derived from `clock_out`, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryState {
    Open,
    Closed,
}

impl EntryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryState::Open => "open",
            EntryState::Closed => "closed",
        }
    }
}

/// One clock-in/clock-out record for a user.
///
/// `duration` holds the ISO-8601 textual form of `clock_out - clock_in` and
/// is present exactly when `clock_out` is set. It is derived: the stored
/// timestamps stay authoritative and the value is recomputed on every edit.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: String,
    pub organization_id: i64,
    pub project_id: Option<i64>,
    pub location_id: Option<i64>,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub duration: Option<String>,
}

impl TimeEntry {
    pub fn state(&self) -> EntryState {
        if self.clock_out.is_none() {
            EntryState::Open
        } else {
            EntryState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Decimal hours worked. An open entry contributes nothing.
    pub fn worked_hours(&self) -> f64 {
        match self.clock_out {
            Some(out) => (out - self.clock_in).num_seconds() as f64 / 3600.0,
            None => 0.0,
        }
    }
}

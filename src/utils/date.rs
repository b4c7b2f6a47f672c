//! Date/timestamp helpers: UTC parsing, day bounds, storage formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Storage format for timestamps: RFC 3339 at second resolution, always "Z".
/// Strings in this format compare lexicographically in chronological order,
/// which the range queries rely on.
pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp back. Stored values are always RFC 3339.
pub fn parse_stored_ts(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Parse a user-supplied timestamp, normalizing to UTC.
///
/// Accepts RFC 3339 (any offset) or a naive "YYYY-MM-DD HH:MM[:SS]" which is
/// taken as already-UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// 00:00:00 UTC on the given date.
pub fn day_start(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

/// 23:59:59 UTC on the given date, for inclusive upper bounds.
pub fn day_end(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(23, 59, 59).expect("end of day is always valid"))
}

/// Parse an optional "YYYY-MM-DD" CLI argument into an inclusive lower bound.
pub fn parse_from_bound(s: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    match s {
        Some(raw) => Ok(Some(day_start(parse_date(raw)?))),
        None => Ok(None),
    }
}

/// Parse an optional "YYYY-MM-DD" CLI argument into an inclusive upper bound.
pub fn parse_to_bound(s: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    match s {
        Some(raw) => Ok(Some(day_end(parse_date(raw)?))),
        None => Ok(None),
    }
}

//! Elapsed-time codec: ISO-8601 textual durations (PnDTnHnMnS) and the
//! decimal-hours conversion used by reporting.

use crate::errors::{AppError, AppResult};
use chrono::Duration;

/// Decomposed ISO-8601 duration. Seconds carry an optional fraction; the
/// coarser components are whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: f64,
}

impl DurationParts {
    pub fn total_seconds(&self) -> f64 {
        (self.days * 86_400 + self.hours * 3_600 + self.minutes * 60) as f64 + self.seconds
    }

    /// days*24 + hours + minutes/60 + seconds/3600
    pub fn total_hours(&self) -> f64 {
        self.days as f64 * 24.0
            + self.hours as f64
            + self.minutes as f64 / 60.0
            + self.seconds / 3600.0
    }
}

/// Serialize an elapsed time as an ISO-8601 duration.
///
/// Zero components are omitted ("PT8H30M", "P1D"); the zero duration is
/// "PT0S". The input must not be negative; callers validate the timestamps
/// before encoding.
pub fn encode(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut out = String::from("P");

    if days > 0 {
        out.push_str(&format!("{}D", days));
    }

    if hours > 0 || minutes > 0 || seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 {
            out.push_str(&format!("{}S", seconds));
        }
    } else if days == 0 {
        out.push_str("T0S");
    }

    out
}

/// Parse an ISO-8601 duration back into its components.
///
/// Accepts exactly the day/time subset this crate emits (no year/month/week
/// designators), with an optional fractional seconds component. Components
/// must appear in D, H, M, S order, each at most once.
pub fn decode(s: &str) -> AppResult<DurationParts> {
    let bad = || AppError::InvalidDuration(s.to_string());

    let body = s.strip_prefix('P').ok_or_else(bad)?;
    if body.is_empty() {
        return Err(bad());
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (body, None),
    };

    let mut parts = DurationParts {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0.0,
    };

    if !date_part.is_empty() {
        let digits = date_part.strip_suffix('D').ok_or_else(bad)?;
        parts.days = digits.parse::<i64>().map_err(|_| bad())?;
    }

    if let Some(time) = time_part {
        if time.is_empty() {
            return Err(bad());
        }

        let mut rest = time;
        // Designators already consumed, in order; 0 = none, 1 = H, 2 = M, 3 = S.
        let mut consumed = 0u8;

        while !rest.is_empty() {
            let num_len = rest
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .ok_or_else(bad)?;
            if num_len == 0 {
                return Err(bad());
            }

            let number = &rest[..num_len];
            let designator = rest.as_bytes()[num_len];
            if !designator.is_ascii() {
                return Err(bad());
            }
            rest = &rest[num_len + 1..];

            match designator {
                b'H' if consumed < 1 => {
                    parts.hours = number.parse::<i64>().map_err(|_| bad())?;
                    consumed = 1;
                }
                b'M' if consumed < 2 => {
                    parts.minutes = number.parse::<i64>().map_err(|_| bad())?;
                    consumed = 2;
                }
                b'S' if consumed < 3 => {
                    parts.seconds = number.parse::<f64>().map_err(|_| bad())?;
                    consumed = 3;
                }
                _ => return Err(bad()),
            }
        }
    }

    Ok(parts)
}

/// Decimal hours between two instants, for report aggregation.
pub fn hours_between(elapsed: Duration) -> f64 {
    elapsed.num_seconds() as f64 / 3600.0
}

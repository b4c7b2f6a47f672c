use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval).
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{}: start and end must use the same format",
                r
            )));
        }

        let d1 = period_start(start)?;
        let d2 = period_end(end)?;
        Ok((d1, d2))
    } else {
        Ok((period_start(r)?, period_end(r)?))
    }
}

/// First day covered by a period literal.
fn period_start(p: &str) -> AppResult<NaiveDate> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| AppError::InvalidDate(p.to_string()))?;
            NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| AppError::InvalidDate(p.to_string()))
        }
        7 => {
            let (y, m) = split_year_month(p)?;
            NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| AppError::InvalidDate(p.to_string()))
        }
        10 => NaiveDate::parse_from_str(p, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(p.to_string())),
        _ => Err(AppError::InvalidDate(p.to_string())),
    }
}

/// Last day covered by a period literal.
fn period_end(p: &str) -> AppResult<NaiveDate> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| AppError::InvalidDate(p.to_string()))?;
            NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| AppError::InvalidDate(p.to_string()))
        }
        7 => {
            let (y, m) = split_year_month(p)?;
            let last = month_last_day(y, m).ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| AppError::InvalidDate(p.to_string()))
        }
        10 => NaiveDate::parse_from_str(p, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(p.to_string())),
        _ => Err(AppError::InvalidDate(p.to_string())),
    }
}

fn split_year_month(p: &str) -> AppResult<(i32, u32)> {
    let (y_raw, m_raw) = p
        .split_once('-')
        .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
    let y: i32 = y_raw
        .parse()
        .map_err(|_| AppError::InvalidDate(p.to_string()))?;
    let m: u32 = m_raw
        .parse()
        .map_err(|_| AppError::InvalidDate(p.to_string()))?;
    if !(1..=12).contains(&m) {
        return Err(AppError::InvalidDate(p.to_string()));
    }
    Ok((y, m))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

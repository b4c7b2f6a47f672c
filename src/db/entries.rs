//! Time-entry store operations. All functions take a plain connection and
//! return domain models; callers own the transaction boundary (each CLI
//! operation is a single read-modify-write).

use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::utils::date::{format_ts, parse_stored_ts};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

const ENTRY_COLUMNS: &str =
    "id, user_id, organization_id, project_id, location_id, clock_in, clock_out, duration";

pub fn map_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    let clock_in_raw: String = row.get("clock_in")?;
    let clock_in = parse_stored_ts(&clock_in_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let clock_out_raw: Option<String> = row.get("clock_out")?;
    let clock_out = match clock_out_raw {
        Some(raw) => Some(parse_stored_ts(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        organization_id: row.get("organization_id")?,
        project_id: row.get("project_id")?,
        location_id: row.get("location_id")?,
        clock_in,
        clock_out,
        duration: row.get("duration")?,
    })
}

/// Insert a new entry and return it with the assigned id.
pub fn insert_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<TimeEntry> {
    conn.execute(
        "INSERT INTO time_entries
             (user_id, organization_id, project_id, location_id, clock_in, clock_out, duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.user_id,
            entry.organization_id,
            entry.project_id,
            entry.location_id,
            format_ts(entry.clock_in),
            entry.clock_out.map(format_ts),
            entry.duration,
        ],
    )
    .map_err(|e| match e {
        // The partial unique index on open entries reports as a constraint
        // violation; surface it as the lifecycle error it represents.
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::AlreadyClockedIn(entry.user_id.clone())
        }
        other => AppError::Db(other),
    })?;

    let mut created = entry.clone();
    created.id = conn.last_insert_rowid();
    Ok(created)
}

pub fn get_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ?1");
    let entry = conn
        .query_row(&sql, [id], map_entry)
        .optional()?;
    Ok(entry)
}

/// Persist every mutable field of an entry (timestamps, duration, references).
pub fn update_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE time_entries
         SET project_id = ?1, location_id = ?2,
             clock_in = ?3, clock_out = ?4, duration = ?5
         WHERE id = ?6",
        params![
            entry.project_id,
            entry.location_id,
            format_ts(entry.clock_in),
            entry.clock_out.map(format_ts),
            entry.duration,
            entry.id,
        ],
    )?;
    Ok(())
}

/// Hard delete. Returns the number of removed rows so callers can
/// distinguish "gone" from "never existed".
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    Ok(n)
}

/// The user's currently open entry, if any. The store guarantees at most one.
pub fn open_entry_for_user(conn: &Connection, user_id: &str) -> AppResult<Option<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE user_id = ?1 AND clock_out IS NULL"
    );
    let entry = conn.query_row(&sql, [user_id], map_entry).optional()?;
    Ok(entry)
}

/// Entries for a user whose clock-in falls inside the (optional) bounds,
/// both ends inclusive and independently optional.
pub fn entries_for_user(
    conn: &Connection,
    user_id: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE user_id = ?1
           AND (?2 IS NULL OR clock_in >= ?2)
           AND (?3 IS NULL OR clock_in <= ?3)
         ORDER BY clock_in ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![user_id, from.map(format_ts), to.map(format_ts)],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Org-scoped window query for a single user; open entries are included so a
/// manager sees an in-progress shift.
pub fn entries_for_user_in_org(
    conn: &Connection,
    user_id: &str,
    organization_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE organization_id = ?1 AND user_id = ?2
           AND clock_in >= ?3
           AND (clock_out <= ?4 OR clock_out IS NULL)
         ORDER BY clock_in ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![organization_id, user_id, format_ts(from), format_ts(to)],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Most recent entry for a user (clock-in descending), open or closed.
pub fn most_recent_for_user(conn: &Connection, user_id: &str) -> AppResult<Option<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE user_id = ?1
         ORDER BY clock_in DESC
         LIMIT 1"
    );
    let entry = conn.query_row(&sql, [user_id], map_entry).optional()?;
    Ok(entry)
}

/// Closed entries of an organization inside a reporting window:
/// clock-in at/after the start, clock-out at/before the end.
pub fn closed_entries_for_org(
    conn: &Connection,
    organization_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE organization_id = ?1
           AND clock_in >= ?2
           AND clock_out IS NOT NULL AND clock_out <= ?3"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![organization_id, format_ts(from), format_ts(to)],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Same window as [`closed_entries_for_org`], filtered to one project.
pub fn closed_entries_for_project(
    conn: &Connection,
    project_id: i64,
    organization_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE project_id = ?1 AND organization_id = ?2
           AND clock_in >= ?3
           AND clock_out IS NOT NULL AND clock_out <= ?4"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            project_id,
            organization_id,
            format_ts(from),
            format_ts(to)
        ],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Full scan for export: optional org filter, optional clock-in bounds.
pub fn all_entries(
    conn: &Connection,
    organization_id: Option<i64>,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE (?1 IS NULL OR organization_id = ?1)
           AND (?2 IS NULL OR clock_in >= ?2)
           AND (?3 IS NULL OR clock_in <= ?3)
         ORDER BY clock_in ASC"
    );

    let (from, to) = match bounds {
        Some((f, t)) => (Some(format_ts(f)), Some(format_ts(t))),
        None => (None, None),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![organization_id, from, to], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

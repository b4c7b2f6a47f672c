//! Versioned schema migrations driven by `PRAGMA user_version`.
//! Every step is idempotent; `init` and `db --migrate` both funnel here.

use crate::errors::AppResult;
use crate::ui::messages::info;
use rusqlite::Connection;

const SCHEMA_VERSION: i64 = 2;

pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let mut version = current_version(conn)?;

    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    if version < 1 {
        info("Applying migration 1: base schema");
        apply_base_schema(conn)?;
        version = 1;
        set_version(conn, version)?;
    }

    if version < 2 {
        info("Applying migration 2: open-entry uniqueness guard");
        apply_open_entry_guard(conn)?;
        version = 2;
        set_version(conn, version)?;
    }

    Ok(())
}

pub fn current_version(conn: &Connection) -> AppResult<i64> {
    let v: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(v)
}

fn set_version(conn: &Connection, version: i64) -> AppResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

/// Tenant directory plus the time_entries table.
/// Relationships are plain id columns resolved through explicit queries;
/// there is no navigable object graph.
fn apply_base_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id                   TEXT PRIMARY KEY,
            email                TEXT NOT NULL UNIQUE,
            first_name           TEXT,
            last_name            TEXT,
            job_title            TEXT,
            pay_rate             REAL,
            manages_organization INTEGER NOT NULL DEFAULT 0,
            organization_id      INTEGER
        );

        CREATE TABLE IF NOT EXISTS projects (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            description     TEXT,
            organization_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS locations (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            description     TEXT,
            organization_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL,
            organization_id INTEGER NOT NULL,
            project_id      INTEGER,
            location_id     INTEGER,
            clock_in        TEXT NOT NULL,
            clock_out       TEXT,
            duration        TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_clock_in
            ON time_entries(user_id, clock_in);
        CREATE INDEX IF NOT EXISTS idx_entries_org_clock_in
            ON time_entries(organization_id, clock_in);
        "#,
    )?;
    Ok(())
}

/// At most one open entry per user, enforced at the store layer.
/// A second concurrent clock-in hits this index even if the pre-check raced.
fn apply_open_entry_guard(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_open_user
            ON time_entries(user_id) WHERE clock_out IS NULL;
        "#,
    )?;
    Ok(())
}

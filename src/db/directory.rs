//! Tenant directory store: organizations, users, projects, locations.
//! Reference checks used by the lifecycle engine live here too, so every
//! mutation path validates against the same queries.

use crate::errors::AppResult;
use crate::models::location::Location;
use crate::models::organization::Organization;
use crate::models::project::Project;
use crate::models::user::User;
use crate::utils::date::{format_ts, parse_stored_ts};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

fn map_organization(row: &Row) -> rusqlite::Result<Organization> {
    let created_raw: String = row.get("created_at")?;
    let created_at = parse_stored_ts(&created_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at,
    })
}

pub fn insert_organization(
    conn: &Connection,
    name: &str,
    created_at: DateTime<Utc>,
) -> AppResult<Organization> {
    conn.execute(
        "INSERT INTO organizations (name, created_at) VALUES (?1, ?2)",
        params![name, format_ts(created_at)],
    )?;

    Ok(Organization {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        created_at,
    })
}

pub fn get_organization(conn: &Connection, id: i64) -> AppResult<Option<Organization>> {
    let org = conn
        .query_row(
            "SELECT id, name, created_at FROM organizations WHERE id = ?1",
            [id],
            map_organization,
        )
        .optional()?;
    Ok(org)
}

pub fn organization_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM organizations WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

pub fn list_organizations(conn: &Connection) -> AppResult<Vec<Organization>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM organizations ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_organization)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        job_title: row.get("job_title")?,
        pay_rate: row.get("pay_rate")?,
        manages_organization: row.get::<_, i64>("manages_organization")? != 0,
        organization_id: row.get("organization_id")?,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users
             (id, email, first_name, last_name, job_title, pay_rate,
              manages_organization, organization_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user.id,
            user.email,
            user.first_name,
            user.last_name,
            user.job_title,
            user.pay_rate,
            user.manages_organization as i64,
            user.organization_id,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, email, first_name, last_name, job_title, pay_rate,
                    manages_organization, organization_id
             FROM users WHERE id = ?1",
            [id],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn list_users(conn: &Connection, organization_id: i64) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, first_name, last_name, job_title, pay_rate,
                manages_organization, organization_id
         FROM users
         WHERE organization_id = ?1
         ORDER BY email ASC",
    )?;
    let rows = stmt.query_map([organization_id], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_pay_rate(conn: &Connection, user_id: &str, rate: f64) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE users SET pay_rate = ?1 WHERE id = ?2",
        params![rate, user_id],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        organization_id: row.get("organization_id")?,
    })
}

pub fn insert_project(
    conn: &Connection,
    organization_id: i64,
    name: &str,
    description: Option<&str>,
) -> AppResult<Project> {
    conn.execute(
        "INSERT INTO projects (name, description, organization_id) VALUES (?1, ?2, ?3)",
        params![name, description, organization_id],
    )?;

    Ok(Project {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.map(|d| d.to_string()),
        organization_id,
    })
}

pub fn list_projects(conn: &Connection, organization_id: i64) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, organization_id
         FROM projects WHERE organization_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([organization_id], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Reference check used before attaching a project to an entry.
pub fn project_in_org(conn: &Connection, id: i64, organization_id: i64) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM projects WHERE id = ?1 AND organization_id = ?2")?;
    Ok(stmt.exists(params![id, organization_id])?)
}

/// Delete a project. Entries referencing it keep their stale id; reports
/// simply stop matching it (no cascade).
pub fn delete_project(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

fn map_location(row: &Row) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        organization_id: row.get("organization_id")?,
    })
}

pub fn insert_location(
    conn: &Connection,
    organization_id: i64,
    name: &str,
    description: Option<&str>,
) -> AppResult<Location> {
    conn.execute(
        "INSERT INTO locations (name, description, organization_id) VALUES (?1, ?2, ?3)",
        params![name, description, organization_id],
    )?;

    Ok(Location {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.map(|d| d.to_string()),
        organization_id,
    })
}

pub fn list_locations(conn: &Connection, organization_id: i64) -> AppResult<Vec<Location>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, organization_id
         FROM locations WHERE organization_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([organization_id], map_location)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn location_in_org(conn: &Connection, id: i64, organization_id: i64) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM locations WHERE id = ?1 AND organization_id = ?2")?;
    Ok(stmt.exists(params![id, organization_id])?)
}

pub fn delete_location(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM locations WHERE id = ?1", [id])?;
    Ok(n)
}

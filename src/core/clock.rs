//! Clock-in / clock-out lifecycle.
//!
//! An entry is Open while `clock_out` is unset and Closed afterwards; there
//! are no other states. The `*_at` variants take the current instant
//! explicitly so tests can drive the clock; the plain variants pass
//! `Utc::now()`.

use crate::db::pool::DbPool;
use crate::db::{directory, entries};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::utils::duration;
use chrono::{DateTime, Utc};

pub struct ClockLogic;

impl ClockLogic {
    pub fn clock_in(
        pool: &mut DbPool,
        user_id: &str,
        organization_id: i64,
        project_id: Option<i64>,
        location_id: Option<i64>,
    ) -> AppResult<TimeEntry> {
        Self::clock_in_at(
            pool,
            user_id,
            organization_id,
            project_id,
            location_id,
            Utc::now(),
        )
    }

    /// Create a new open entry.
    ///
    /// All references are validated up front: the user and organization must
    /// exist, and any supplied project/location must belong to that
    /// organization. A user with an open entry cannot clock in again; the
    /// partial unique index backs the pre-check against races.
    pub fn clock_in_at(
        pool: &mut DbPool,
        user_id: &str,
        organization_id: i64,
        project_id: Option<i64>,
        location_id: Option<i64>,
        at: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        let conn = &pool.conn;

        directory::get_user(conn, user_id)?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        if !directory::organization_exists(conn, organization_id)? {
            return Err(AppError::OrganizationNotFound(organization_id));
        }

        if let Some(pid) = project_id
            && !directory::project_in_org(conn, pid, organization_id)?
        {
            return Err(AppError::ProjectNotFound(pid));
        }

        if let Some(lid) = location_id
            && !directory::location_in_org(conn, lid, organization_id)?
        {
            return Err(AppError::LocationNotFound(lid));
        }

        if entries::open_entry_for_user(conn, user_id)?.is_some() {
            return Err(AppError::AlreadyClockedIn(user_id.to_string()));
        }

        let entry = TimeEntry {
            id: 0,
            user_id: user_id.to_string(),
            organization_id,
            project_id,
            location_id,
            clock_in: at,
            clock_out: None,
            duration: None,
        };

        entries::insert_entry(conn, &entry)
    }

    pub fn clock_out(pool: &mut DbPool, entry_id: i64) -> AppResult<TimeEntry> {
        Self::clock_out_at(pool, entry_id, Utc::now())
    }

    /// Close an open entry: set clock-out, compute and store the duration.
    /// Closing twice is an error, never a silent overwrite.
    pub fn clock_out_at(pool: &mut DbPool, entry_id: i64, at: DateTime<Utc>) -> AppResult<TimeEntry> {
        let conn = &pool.conn;

        let mut entry =
            entries::get_entry(conn, entry_id)?.ok_or(AppError::EntryNotFound(entry_id))?;

        if entry.clock_out.is_some() {
            return Err(AppError::AlreadyClockedOut(entry_id));
        }

        if at < entry.clock_in {
            return Err(AppError::NegativeDuration);
        }

        entry.clock_out = Some(at);
        entry.duration = Some(duration::encode(at - entry.clock_in));

        entries::update_entry(conn, &entry)?;
        Ok(entry)
    }

    /// Most recent entry for a user, open or closed. `None` when the user has
    /// never clocked in.
    pub fn most_recent(pool: &mut DbPool, user_id: &str) -> AppResult<Option<TimeEntry>> {
        entries::most_recent_for_user(&pool.conn, user_id)
    }
}

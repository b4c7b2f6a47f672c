//! Entry corrections and queries: the manager-facing side of the lifecycle.

use crate::db::pool::DbPool;
use crate::db::{directory, entries};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::utils::duration;
use chrono::{DateTime, Utc};

/// Fields a correction may touch. `None` leaves the stored value alone;
/// timestamps are already normalized to UTC by the caller.
#[derive(Debug, Default, Clone)]
pub struct EntryUpdate {
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub project_id: Option<i64>,
    pub location_id: Option<i64>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none()
            && self.clock_out.is_none()
            && self.project_id.is_none()
            && self.location_id.is_none()
    }
}

pub struct EntryLogic;

impl EntryLogic {
    pub fn get(pool: &mut DbPool, entry_id: i64) -> AppResult<TimeEntry> {
        entries::get_entry(&pool.conn, entry_id)?.ok_or(AppError::EntryNotFound(entry_id))
    }

    /// Apply a correction to an existing entry.
    ///
    /// If either timestamp changes the duration is recomputed; an edit that
    /// would make the effective clock-out precede clock-in is rejected and
    /// nothing is persisted. Setting a clock-out on an open entry closes it.
    /// Project/location references are validated against the entry's
    /// organization before the mutation.
    pub fn update(pool: &mut DbPool, entry_id: i64, changes: &EntryUpdate) -> AppResult<TimeEntry> {
        let conn = &pool.conn;

        let mut entry =
            entries::get_entry(conn, entry_id)?.ok_or(AppError::EntryNotFound(entry_id))?;

        let mut time_changed = false;

        if let Some(new_in) = changes.clock_in {
            entry.clock_in = new_in;
            time_changed = true;
        }
        if let Some(new_out) = changes.clock_out {
            entry.clock_out = Some(new_out);
            time_changed = true;
        }

        if let Some(pid) = changes.project_id {
            if !directory::project_in_org(conn, pid, entry.organization_id)? {
                return Err(AppError::ProjectNotFound(pid));
            }
            entry.project_id = Some(pid);
        }
        if let Some(lid) = changes.location_id {
            if !directory::location_in_org(conn, lid, entry.organization_id)? {
                return Err(AppError::LocationNotFound(lid));
            }
            entry.location_id = Some(lid);
        }

        if time_changed {
            match entry.clock_out {
                Some(out) => {
                    if out < entry.clock_in {
                        return Err(AppError::NegativeDuration);
                    }
                    entry.duration = Some(duration::encode(out - entry.clock_in));
                }
                // Moving the clock-in of a still-open entry: nothing to
                // recompute until it closes.
                None => entry.duration = None,
            }
        }

        entries::update_entry(conn, &entry)?;
        Ok(entry)
    }

    /// Hard delete, no audit trail, no cascade onto the user.
    pub fn delete(pool: &mut DbPool, entry_id: i64) -> AppResult<()> {
        let removed = entries::delete_entry(&pool.conn, entry_id)?;
        if removed == 0 {
            return Err(AppError::EntryNotFound(entry_id));
        }
        Ok(())
    }

    /// Entries for a user, clock-in within `[from, to]`, both bounds
    /// independently optional. No entries is an empty list, not an error.
    pub fn list_for_user(
        pool: &mut DbPool,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<TimeEntry>> {
        entries::entries_for_user(&pool.conn, user_id, from, to)
    }

    /// Org-scoped mandatory window for one user, including open entries.
    pub fn window_for_user(
        pool: &mut DbPool,
        user_id: &str,
        organization_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<TimeEntry>> {
        entries::entries_for_user_in_org(&pool.conn, user_id, organization_id, from, to)
    }
}

//! Payroll and project reporting: group closed entries by user, sum decimal
//! hours, snapshot the user's current rate.

use crate::db::pool::DbPool;
use crate::db::{directory, entries};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::models::report::PayrollRow;
use crate::utils::duration::hours_between;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub struct ReportLogic;

impl ReportLogic {
    /// Payroll across an organization. Entries qualify when they are closed,
    /// clock in at/after `start` and clock out at/before `end`. An empty
    /// window yields an empty report, not an error.
    pub fn payroll(
        pool: &mut DbPool,
        organization_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<PayrollRow>> {
        check_window(start, end)?;

        let rows = entries::closed_entries_for_org(&pool.conn, organization_id, start, end)?;
        Self::aggregate(pool, &rows)
    }

    /// Same aggregation narrowed to one project. Unlike payroll, an empty
    /// result set is reported as an error so callers can distinguish "no
    /// such activity" from a blank report.
    pub fn project(
        pool: &mut DbPool,
        project_id: i64,
        organization_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<PayrollRow>> {
        check_window(start, end)?;

        let rows = entries::closed_entries_for_project(
            &pool.conn,
            project_id,
            organization_id,
            start,
            end,
        )?;

        if rows.is_empty() {
            return Err(AppError::NoProjectEntries(project_id));
        }

        Self::aggregate(pool, &rows)
    }

    /// Group by user in first-seen order. Hours are recomputed from the
    /// stored timestamps, not the serialized duration.
    fn aggregate(pool: &mut DbPool, rows: &[TimeEntry]) -> AppResult<Vec<PayrollRow>> {
        let conn = &pool.conn;

        let mut report: Vec<PayrollRow> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in rows {
            let hours = match entry.clock_out {
                Some(out) => hours_between(out - entry.clock_in),
                None => 0.0,
            };

            if let Some(&i) = index.get(&entry.user_id) {
                report[i].total_hours += hours;
                continue;
            }

            let (user_name, pay_rate) = match directory::get_user(conn, &entry.user_id)? {
                Some(user) => (user.display_name(), user.pay_rate.unwrap_or(0.0)),
                None => ("Unknown".to_string(), 0.0),
            };

            index.insert(entry.user_id.clone(), report.len());
            report.push(PayrollRow {
                user_id: entry.user_id.clone(),
                user_name,
                total_hours: hours,
                pay_rate,
            });
        }

        Ok(report)
    }
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if start > end {
        return Err(AppError::InvalidRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    Ok(())
}

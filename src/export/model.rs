use crate::models::entry::TimeEntry;
use crate::models::report::PayrollRow;
use crate::utils::date::format_ts;
use serde::Serialize;

/// Flat row for time-entry exports.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub user_id: String,
    pub organization_id: i64,
    pub project_id: Option<i64>,
    pub location_id: Option<i64>,
    pub clock_in: String,
    pub clock_out: Option<String>,
    pub duration: Option<String>,
    pub state: String,
}

impl EntryExport {
    pub fn from_entry(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id.clone(),
            organization_id: entry.organization_id,
            project_id: entry.project_id,
            location_id: entry.location_id,
            clock_in: format_ts(entry.clock_in),
            clock_out: entry.clock_out.map(format_ts),
            duration: entry.duration.clone(),
            state: entry.state().as_str().to_string(),
        }
    }
}

pub(crate) fn entry_headers() -> Vec<&'static str> {
    vec![
        "id",
        "user_id",
        "organization_id",
        "project_id",
        "location_id",
        "clock_in",
        "clock_out",
        "duration",
        "state",
    ]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.user_id.clone(),
        e.organization_id.to_string(),
        e.project_id.map(|p| p.to_string()).unwrap_or_default(),
        e.location_id.map(|l| l.to_string()).unwrap_or_default(),
        e.clock_in.clone(),
        e.clock_out.clone().unwrap_or_default(),
        e.duration.clone().unwrap_or_default(),
        e.state.clone(),
    ]
}

/// Flat row for payroll-report exports.
#[derive(Serialize, Clone, Debug)]
pub struct PayrollExport {
    pub user_id: String,
    pub user_name: String,
    pub total_hours: f64,
    pub pay_rate: f64,
    pub gross_pay: f64,
}

impl PayrollExport {
    pub fn from_row(row: &PayrollRow) -> Self {
        Self {
            user_id: row.user_id.clone(),
            user_name: row.user_name.clone(),
            total_hours: row.total_hours,
            pay_rate: row.pay_rate,
            gross_pay: row.gross_pay(),
        }
    }
}

pub(crate) fn payroll_headers() -> Vec<&'static str> {
    vec!["user_id", "user_name", "total_hours", "pay_rate", "gross_pay"]
}

pub(crate) fn payroll_to_row(r: &PayrollExport) -> Vec<String> {
    vec![
        r.user_id.clone(),
        r.user_name.clone(),
        format!("{:.2}", r.total_hours),
        format!("{:.2}", r.pay_rate),
        format!("{:.2}", r.gross_pay),
    ]
}

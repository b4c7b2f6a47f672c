use crate::core::report::ReportLogic;
use crate::db::entries;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    EntryExport, PayrollExport, entry_headers, entry_to_row, payroll_headers, payroll_to_row,
};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::{day_end, day_start};
use crate::utils::path::is_absolute;
use chrono::{DateTime, Utc};
use std::path::Path;

/// What gets written to the output file.
#[derive(Debug, Clone)]
pub enum ExportDataset {
    /// Raw time entries, optionally filtered to one organization.
    Entries { organization: Option<i64> },
    /// Aggregated payroll report; requires an organization and a range.
    Payroll { organization: i64 },
}

/// High-level export orchestration.
pub struct ExportLogic;

impl ExportLogic {
    /// `range` accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, colon-separated
    /// spans of those, or "all"/None for no date filter.
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        range: &Option<String>,
        dataset: &ExportDataset,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => {
                let (start, end) = parse_range(r)?;
                Some((day_start(start), day_end(end)))
            }
        };

        match dataset {
            ExportDataset::Entries { organization } => {
                let rows = entries::all_entries(&pool.conn, *organization, bounds)?;
                if rows.is_empty() {
                    warning("No entries found for the selected range.");
                    return Ok(());
                }

                let exports: Vec<EntryExport> =
                    rows.iter().map(EntryExport::from_entry).collect();

                match format {
                    ExportFormat::Csv => export_csv(&exports, path),
                    ExportFormat::Json => export_json(&exports, path),
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = exports.iter().map(entry_to_row).collect();
                        export_xlsx(&entry_headers(), &table, path)
                    }
                }
            }
            ExportDataset::Payroll { organization } => {
                let (start, end) = bounds.ok_or_else(|| {
                    AppError::Export("payroll export requires --range".to_string())
                })?;

                let report = ReportLogic::payroll(pool, *organization, start, end)?;
                if report.is_empty() {
                    warning("No payroll data for the selected range.");
                    return Ok(());
                }

                let exports: Vec<PayrollExport> =
                    report.iter().map(PayrollExport::from_row).collect();

                match format {
                    ExportFormat::Csv => export_csv(&exports, path),
                    ExportFormat::Json => export_json(&exports, path),
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = exports.iter().map(payroll_to_row).collect();
                        export_xlsx(&payroll_headers(), &table, path)
                    }
                }
            }
        }
    }
}

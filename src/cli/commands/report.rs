use crate::cli::commands::resolve_org;
use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::directory;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::report::PayrollRow;
use crate::ui::messages::header;
use crate::utils::date::{day_end, day_start, parse_date};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ReportAction::Payroll { org, from, to } => {
                let organization_id = resolve_org(*org, cfg)?;
                let organization = directory::get_organization(&pool.conn, organization_id)?
                    .ok_or(AppError::OrganizationNotFound(organization_id))?;

                let start = day_start(parse_date(from)?);
                let end = day_end(parse_date(to)?);

                let rows = ReportLogic::payroll(&mut pool, organization_id, start, end)?;

                header(format!(
                    "Payroll report for {} ({} to {})",
                    organization.name, from, to
                ));
                if rows.is_empty() {
                    println!("No closed entries in this window.");
                    return Ok(());
                }
                print_report(&rows);
            }
            ReportAction::Project {
                project,
                org,
                from,
                to,
            } => {
                let organization_id = resolve_org(*org, cfg)?;
                let start = day_start(parse_date(from)?);
                let end = day_end(parse_date(to)?);

                let rows =
                    ReportLogic::project(&mut pool, *project, organization_id, start, end)?;

                header(format!("Project {} report ({} to {})", project, from, to));
                print_report(&rows);
            }
        }
    }

    Ok(())
}

fn print_report(rows: &[PayrollRow]) {
    let mut table = Table::new(&["USER", "NAME", "HOURS", "RATE", "PAY"]);

    let mut total_hours = 0.0;
    let mut total_pay = 0.0;

    for r in rows {
        total_hours += r.total_hours;
        total_pay += r.gross_pay();

        table.add_row(vec![
            r.user_id.clone(),
            r.user_name.clone(),
            format!("{:.2}", r.total_hours),
            format!("{:.2}", r.pay_rate),
            format!("{:.2}", r.gross_pay()),
        ]);
    }

    print!("{}", table.render());
    println!("Total: {:.2} h, {:.2}", total_hours, total_pay);
}

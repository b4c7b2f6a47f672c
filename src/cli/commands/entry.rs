use crate::cli::commands::resolve_user;
use crate::cli::parser::{Commands, EntryAction};
use crate::config::Config;
use crate::core::entry::{EntryLogic, EntryUpdate};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{format_ts, parse_from_bound, parse_timestamp, parse_to_bound};
use crate::utils::table::Table;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user.
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Entry { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            EntryAction::Get { id } => {
                let entry = EntryLogic::get(&mut pool, *id)?;
                print_entry(&entry);
            }
            EntryAction::List {
                user,
                org,
                from,
                to,
            } => {
                let user_id = resolve_user(user, cfg)?;

                let entries = match org {
                    // Org-scoped window: both bounds required, open entries
                    // included.
                    Some(organization_id) => {
                        let (Some(start), Some(end)) = (
                            parse_from_bound(from.as_ref())?,
                            parse_to_bound(to.as_ref())?,
                        ) else {
                            return Err(AppError::Config(
                                "--org requires both --from and --to".to_string(),
                            ));
                        };

                        EntryLogic::window_for_user(
                            &mut pool,
                            &user_id,
                            *organization_id,
                            start,
                            end,
                        )?
                    }
                    None => EntryLogic::list_for_user(
                        &mut pool,
                        &user_id,
                        parse_from_bound(from.as_ref())?,
                        parse_to_bound(to.as_ref())?,
                    )?,
                };

                if entries.is_empty() {
                    println!("No entries found.");
                    return Ok(());
                }
                print_entries(&entries);
            }
            EntryAction::Update {
                id,
                clock_in,
                clock_out,
                project,
                location,
            } => {
                let changes = EntryUpdate {
                    clock_in: clock_in.as_deref().map(parse_timestamp).transpose()?,
                    clock_out: clock_out.as_deref().map(parse_timestamp).transpose()?,
                    project_id: *project,
                    location_id: *location,
                };

                if changes.is_empty() {
                    info("Nothing to update.");
                    return Ok(());
                }

                let entry = EntryLogic::update(&mut pool, *id, &changes)?;
                success(format!("Entry {} updated.", entry.id));
                print_entry(&entry);
            }
            EntryAction::Del { id, yes } => {
                if !*yes
                    && !ask_confirmation(&format!(
                        "Delete entry {}? This action is irreversible.",
                        id
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }

                EntryLogic::delete(&mut pool, *id)?;
                success(format!("Entry {} deleted.", id));
            }
        }
    }

    Ok(())
}

pub(crate) fn print_entry(entry: &TimeEntry) {
    print_entries(std::slice::from_ref(entry));
}

pub(crate) fn print_entries(entries: &[TimeEntry]) {
    let mut table = Table::new(&[
        "ID", "USER", "CLOCK IN", "CLOCK OUT", "DURATION", "HOURS", "PROJ", "LOC",
    ]);

    for e in entries {
        let hours = if e.is_open() {
            "--".to_string()
        } else {
            format!("{:.2}", e.worked_hours())
        };

        table.add_row(vec![
            e.id.to_string(),
            e.user_id.clone(),
            format_ts(e.clock_in),
            e.clock_out.map(format_ts).unwrap_or_else(|| "--".to_string()),
            e.duration.clone().unwrap_or_else(|| "--".to_string()),
            hours,
            e.project_id.map(|p| p.to_string()).unwrap_or_else(|| "--".to_string()),
            e.location_id.map(|l| l.to_string()).unwrap_or_else(|| "--".to_string()),
        ]);
    }

    print!("{}", table.render());
}

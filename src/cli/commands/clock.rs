use crate::cli::commands::entry::print_entry;
use crate::cli::commands::{resolve_org, resolve_user};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        Commands::In {
            user,
            org,
            project,
            location,
        } => {
            let user_id = resolve_user(user, cfg)?;
            let organization_id = resolve_org(*org, cfg)?;

            let entry =
                ClockLogic::clock_in(&mut pool, &user_id, organization_id, *project, *location)?;

            success(format!(
                "Clocked in: entry {} for user {}",
                entry.id, entry.user_id
            ));
        }
        Commands::Out { entry } => {
            let closed = ClockLogic::clock_out(&mut pool, *entry)?;

            success(format!(
                "Clocked out: entry {} ({})",
                closed.id,
                closed.duration.as_deref().unwrap_or("--")
            ));
        }
        Commands::Status { user } => {
            let user_id = resolve_user(user, cfg)?;

            match ClockLogic::most_recent(&mut pool, &user_id)? {
                Some(entry) => {
                    info(format!(
                        "Most recent entry for {} ({})",
                        user_id,
                        entry.state().as_str()
                    ));
                    print_entry(&entry);
                }
                None => println!("No time entries for user {}.", user_id),
            }
        }
        _ => {}
    }

    Ok(())
}

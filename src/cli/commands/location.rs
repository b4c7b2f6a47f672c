use crate::cli::commands::resolve_org;
use crate::cli::parser::{Commands, LocationAction};
use crate::config::Config;
use crate::db::directory;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Location { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            LocationAction::Add {
                name,
                org,
                description,
            } => {
                let organization_id = resolve_org(*org, cfg)?;

                if !directory::organization_exists(&pool.conn, organization_id)? {
                    return Err(AppError::OrganizationNotFound(organization_id));
                }

                let location = directory::insert_location(
                    &pool.conn,
                    organization_id,
                    name,
                    description.as_deref(),
                )?;
                success(format!(
                    "Location '{}' created with id {}",
                    location.name, location.id
                ));
            }
            LocationAction::List { org } => {
                let organization_id = resolve_org(*org, cfg)?;
                let locations = directory::list_locations(&pool.conn, organization_id)?;

                if locations.is_empty() {
                    println!("No locations in organization {}.", organization_id);
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "NAME", "DESCRIPTION"]);
                for l in locations {
                    table.add_row(vec![
                        l.id.to_string(),
                        l.name,
                        l.description.unwrap_or_default(),
                    ]);
                }
                print!("{}", table.render());
            }
            LocationAction::Del { id } => {
                let removed = directory::delete_location(&pool.conn, *id)?;
                if removed == 0 {
                    return Err(AppError::LocationNotFound(*id));
                }
                success(format!("Location {} deleted.", id));
            }
        }
    }

    Ok(())
}

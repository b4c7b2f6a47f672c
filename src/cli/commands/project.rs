use crate::cli::commands::resolve_org;
use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::db::directory;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            ProjectAction::Add {
                name,
                org,
                description,
            } => {
                let organization_id = resolve_org(*org, cfg)?;

                if !directory::organization_exists(&pool.conn, organization_id)? {
                    return Err(AppError::OrganizationNotFound(organization_id));
                }

                let project = directory::insert_project(
                    &pool.conn,
                    organization_id,
                    name,
                    description.as_deref(),
                )?;
                success(format!("Project '{}' created with id {}", project.name, project.id));
            }
            ProjectAction::List { org } => {
                let organization_id = resolve_org(*org, cfg)?;
                let projects = directory::list_projects(&pool.conn, organization_id)?;

                if projects.is_empty() {
                    println!("No projects in organization {}.", organization_id);
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "NAME", "DESCRIPTION"]);
                for p in projects {
                    table.add_row(vec![
                        p.id.to_string(),
                        p.name,
                        p.description.unwrap_or_default(),
                    ]);
                }
                print!("{}", table.render());
            }
            ProjectAction::Del { id } => {
                let removed = directory::delete_project(&pool.conn, *id)?;
                if removed == 0 {
                    return Err(AppError::ProjectNotFound(*id));
                }
                success(format!("Project {} deleted.", id));
            }
        }
    }

    Ok(())
}

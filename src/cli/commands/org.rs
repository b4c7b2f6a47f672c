use crate::cli::parser::{Commands, OrgAction};
use crate::config::Config;
use crate::db::directory;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::format_ts;
use crate::utils::table::Table;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Org { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            OrgAction::Add { name } => {
                let org = directory::insert_organization(&pool.conn, name, Utc::now())?;
                success(format!("Organization '{}' created with id {}", org.name, org.id));
            }
            OrgAction::List => {
                let orgs = directory::list_organizations(&pool.conn)?;
                if orgs.is_empty() {
                    println!("No organizations.");
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "NAME", "CREATED"]);
                for org in orgs {
                    table.add_row(vec![
                        org.id.to_string(),
                        org.name,
                        format_ts(org.created_at),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}

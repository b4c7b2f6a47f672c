use crate::cli::commands::resolve_org;
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::db::directory;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::ui::messages::success;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            UserAction::Add {
                email,
                org,
                first_name,
                last_name,
                job_title,
                pay_rate,
                manager,
            } => {
                let organization_id = resolve_org(*org, cfg)?;

                if !directory::organization_exists(&pool.conn, organization_id)? {
                    return Err(AppError::OrganizationNotFound(organization_id));
                }

                let user = User {
                    id: uuid::Uuid::new_v4().to_string(),
                    email: email.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    job_title: job_title.clone(),
                    pay_rate: *pay_rate,
                    manages_organization: *manager,
                    organization_id: Some(organization_id),
                };

                directory::insert_user(&pool.conn, &user)?;
                success(format!("User '{}' created with id {}", user.email, user.id));
            }
            UserAction::List { org } => {
                let organization_id = resolve_org(*org, cfg)?;
                let users = directory::list_users(&pool.conn, organization_id)?;

                if users.is_empty() {
                    println!("No users in organization {}.", organization_id);
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "EMAIL", "NAME", "RATE", "MANAGER"]);
                for u in users {
                    table.add_row(vec![
                        u.id.clone(),
                        u.email.clone(),
                        u.display_name(),
                        u.pay_rate.map(|r| format!("{:.2}", r)).unwrap_or_else(|| "--".to_string()),
                        if u.manages_organization { "yes" } else { "no" }.to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
            UserAction::SetRate { id, rate } => {
                let updated = directory::set_pay_rate(&pool.conn, id, *rate)?;
                if updated == 0 {
                    return Err(AppError::UserNotFound(id.clone()));
                }
                success(format!("Pay rate for {} set to {:.2}", id, rate));
            }
        }
    }

    Ok(())
}

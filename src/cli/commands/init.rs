use crate::config::Config;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Handle the `init` command.
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let path = Config::config_file();
    let mut cfg = Config::load();
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }
    let db_path = cfg.database.clone();

    println!("Initializing timecard…");
    println!("Config file : {}", path.display());
    println!("Database    : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}

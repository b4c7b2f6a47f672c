//! timecard library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules (lifecycle engine, reporting, store, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Org { .. } => cli::commands::org::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg),
        Commands::Project { .. } => cli::commands::project::handle(&cli.command, cfg),
        Commands::Location { .. } => cli::commands::location::handle(&cli.command, cfg),
        Commands::In { .. } | Commands::Out { .. } | Commands::Status { .. } => {
            cli::commands::clock::handle(&cli.command, cfg)
        }
        Commands::Entry { .. } => cli::commands::entry::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once; --db overrides the configured database path.
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}

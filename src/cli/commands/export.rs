use crate::cli::commands::resolve_org;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportDataset, ExportLogic};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        payroll,
        org,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let dataset = if *payroll {
            ExportDataset::Payroll {
                organization: resolve_org(*org, cfg)?,
            }
        } else {
            ExportDataset::Entries {
                organization: org.or(cfg.default_organization),
            }
        };

        ExportLogic::export(&mut pool, format, file, range, &dataset, *force)?;
    }
    Ok(())
}

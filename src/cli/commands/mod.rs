pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod entry;
pub mod export;
pub mod init;
pub mod location;
pub mod org;
pub mod project;
pub mod report;
pub mod user;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Resolve the organization for a command: explicit flag first, then the
/// configured default. Commands never read ambient state beyond this.
pub(crate) fn resolve_org(flag: Option<i64>, cfg: &Config) -> AppResult<i64> {
    flag.or(cfg.default_organization).ok_or_else(|| {
        AppError::Config(
            "no organization specified: pass --org or set default_organization".to_string(),
        )
    })
}

pub(crate) fn resolve_user(flag: &Option<String>, cfg: &Config) -> AppResult<String> {
    flag.clone()
        .or_else(|| cfg.default_user.clone())
        .ok_or_else(|| {
            AppError::Config("no user specified: pass --user or set default_user".to_string())
        })
}

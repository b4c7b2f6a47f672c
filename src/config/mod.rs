use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Organization assumed by clock/report commands when --org is omitted.
    #[serde(default)]
    pub default_organization: Option<i64>,
    /// User assumed by clock/list commands when --user is omitted.
    #[serde(default)]
    pub default_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_organization: None,
            default_user: None,
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("timecard")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".timecard")
        } else {
            PathBuf::from(".timecard")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timecard.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timecard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Self::default(),
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize the configuration file and database location.
    /// In test mode the config file is left alone so test runs never clobber
    /// a real setup.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();

        let db_path = if let Some(name) = custom_db {
            let p = PathBuf::from(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            default_organization: None,
            default_user: None,
        };

        if !is_test {
            config.save()?;
        }

        Ok(())
    }

    /// Report missing/empty fields. Returns the list of problems found.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.database.trim().is_empty() {
            problems.push("database: path is empty".to_string());
        }
        problems
    }
}

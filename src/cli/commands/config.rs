use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::process::Command as ProcessCommand;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("{}", content);
            } else {
                warning(format!(
                    "No configuration file found at {} (run `timecard init`)",
                    path.display()
                ));
            }
        }

        if *check {
            let problems = cfg.check();
            if problems.is_empty() {
                success("Configuration OK.");
            } else {
                for p in problems {
                    warning(p);
                }
            }
        }

        if *edit_config {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "configuration file not found: {} (run `timecard init`)",
                    path.display()
                )));
            }

            let chosen = editor
                .clone()
                .or_else(|| std::env::var("EDITOR").ok())
                .unwrap_or_else(|| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            info(format!("Opening {} with {}", path.display(), chosen));

            let status = ProcessCommand::new(&chosen).arg(&path).status()?;
            if !status.success() {
                return Err(AppError::Config(format!("editor '{}' exited with error", chosen)));
            }
        }
    }

    Ok(())
}

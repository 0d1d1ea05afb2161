use crate::cli::parser::{Cli, Commands};
use crate::config::{Config, migrate::migrate_add_organization};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand. Works on local files only, so it
/// never asks for a token.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = &cli.command
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            let yaml = serde_yaml::to_string(&cfg)
                .map_err(|e| AppError::Config(format!("config serialize error: {e}")))?;
            println!("{}", yaml);
        }

        // ---- CHECK ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in effect. Run `hourbook init`.",
                    path.display()
                ));
                return Ok(());
            }

            let content = std::fs::read_to_string(&path)?;
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("unparseable config file: {e}")))?;

            let mut missing = Vec::new();
            for key in ["database", "organization"] {
                if yaml.get(key).is_none() {
                    missing.push(key);
                }
            }

            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                for key in &missing {
                    warning(format!("Missing configuration key: {}", key));
                }
                println!("Run `hourbook config --migrate` to fill in the defaults.");
            }
        }

        // ---- MIGRATE ----
        if *migrate {
            let pool = DbPool::new(&cfg.database)?;
            migrate_add_organization(&pool.conn)?;
        }
    }

    Ok(())
}

//! hourbook library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod auth;
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
        Commands::Init { .. } => cli::commands::init::handle(cli, cfg),
        Commands::Employee(_) => cli::commands::employee::handle(cli, cfg),
        Commands::Project(_) => cli::commands::project::handle(cli, cfg),
        Commands::Hours(_) => cli::commands::hours::handle(cli, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(cli, cfg),
        Commands::Report { .. } => cli::commands::report::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
        Commands::Db { .. } => cli::commands::db::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load();

    // apply DB override from the command line
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}

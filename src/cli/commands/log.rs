use crate::cli::commands::open_authenticated;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if matches!(cli.command, Commands::Log { print: true }) {
        let (pool, _admin) = open_authenticated(cli, cfg)?;
        LogLogic::print_log(&pool.conn)?;
    }

    Ok(())
}

use crate::cli::commands::open_authenticated;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let (pool, admin) = open_authenticated(cli, cfg)?;
        ExportLogic::export(&pool.conn, &admin, format.clone(), file, range, *force)?;
    }
    Ok(())
}

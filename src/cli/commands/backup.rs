use crate::cli::commands::open_authenticated;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::success;
use crate::utils::path::resolve_output_path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = &cli.command {
        let (pool, admin) = open_authenticated(cli, cfg)?;

        let dest = resolve_output_path(file)?;
        ensure_writable(&dest, false)?;

        let written = BackupLogic::backup(&pool.conn, &admin, cfg, &dest, *compress)?;
        success(format!("Backup written to {}", written.display()));
    }

    Ok(())
}

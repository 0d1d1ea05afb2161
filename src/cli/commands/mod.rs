pub mod backup;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod hours;
pub mod init;
pub mod log;
pub mod project;
pub mod report;
pub mod stats;

use crate::auth::{self, Admin};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Open the configured database and authenticate the calling admin.
///
/// Every command that reads or writes business data goes through here;
/// only local maintenance (`init`, `db`, `config`) skips it, since those
/// must work before any admin account exists.
pub(crate) fn open_authenticated(cli: &Cli, cfg: &Config) -> AppResult<(DbPool, Admin)> {
    let pool = DbPool::new(&cfg.database)?;
    let token = auth::resolve_token(cli.token.as_deref())?;
    let admin = auth::authenticate(&pool.conn, &token)?;
    Ok((pool, admin))
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

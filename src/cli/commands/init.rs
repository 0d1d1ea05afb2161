use crate::auth;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
///  - the first admin account
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Init {
        admin_user,
        admin_token,
    } = &cli.command
    {
        Config::init_all(cli.db.clone(), cli.test)?;

        println!("⚙️  Initializing hourbook…");
        println!("📄 Config file : {}", Config::config_file().display());
        println!("🗄️  Database   : {}", &cfg.database);

        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        success(format!("Database initialized at {}", &cfg.database));

        // First admin account. Re-running init never rotates an existing
        // token, so a mistyped `init` cannot lock anyone out.
        let token = match admin_token {
            Some(t) => t.clone(),
            None => auth::generate_token(),
        };

        if auth::create_admin(&pool.conn, admin_user, &token)? {
            success(format!("Admin user '{}' created", admin_user));
            println!("🔑 Admin token : {}", token);
            warning("Store this token safely, it is not shown again.");
        } else {
            info(format!(
                "Admin user '{}' already exists, token unchanged.",
                admin_user
            ));
        }

        if let Err(e) = oplog(
            &pool.conn,
            "init",
            "database",
            &format!("Database initialized at {}", &cfg.database),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        println!("🎉 hourbook initialization completed!");
    }
    Ok(())
}

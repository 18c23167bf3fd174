use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped with `--test`), the SQLite
/// database and applies all pending migrations. Safe to run twice.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing rCleanOps…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::create(&cfg.database)?;
    if init_db(&pool.conn)? == 0 {
        info("Schema already up to date.");
    }

    if let Err(e) = audit(
        &pool.conn,
        "init",
        &cfg.database,
        "system",
        "Database initialized",
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}

use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let (pool, session) = open_session(cfg)?;

        if *migrate {
            println!("{CYAN}▶ Running migrations…{RESET}");
            let applied = run_pending_migrations(&pool.conn)?;
            println!(
                "{GREEN}✔ Migration completed ({} applied).{RESET}\n",
                applied.len()
            );
        }

        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            println!("{CYAN}▶ Running integrity check…{RESET}");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{GREEN}✔ Integrity check passed.{RESET}\n");
            } else {
                println!("{RED}✘ Integrity check failed:{RESET} {integrity}\n");
            }

            let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
            let dangling = stmt.query_map([], |row| row.get::<_, String>(0))?.count();
            if dangling == 0 {
                println!("{GREEN}✔ Foreign keys consistent.{RESET}\n");
            } else {
                println!("{RED}✘ {dangling} row(s) with dangling references.{RESET}\n");
            }
        }

        if *vacuum {
            println!("{CYAN}▶ Running VACUUM…{RESET}");
            pool.conn.execute_batch("VACUUM;")?;
            audit(&pool.conn, "vacuum", &cfg.database, &session.username, "Database optimized")?;
            println!("{GREEN}✔ Vacuum completed.{RESET}\n");
        }
    }

    Ok(())
}

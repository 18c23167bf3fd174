pub mod backup;
pub mod client;
pub mod config;
pub mod cost;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod log;
pub mod object;
pub mod report;
pub mod schedule;
pub mod service;
pub mod user;

use crate::config::Config;
use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::prompt::ask_confirmation;

/// Open the configured database and load the operator session.
///
/// Every data command goes through here, so a missing database is reported
/// before a missing login.
pub(crate) fn open_session(cfg: &Config) -> AppResult<(DbPool, Session)> {
    let pool = DbPool::new(&cfg.database)?;
    let session = Session::require(&cfg.database)?;
    Ok((pool, session))
}

/// `--yes` skips the prompt.
pub(crate) fn confirmed(yes: bool, prompt: &str) -> bool {
    yes || ask_confirmation(prompt)
}

use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let (pool, session) = open_session(cfg)?;
        BackupLogic::backup(&pool, &session, &cfg.database, file, *compress, *force)?;
    }

    Ok(())
}

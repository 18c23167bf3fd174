//! rCleanOps library root.
//! Exposes the CLI parser, the high-level `run()` function and the internal modules.

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
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::User { .. } => commands::user::handle(cmd, cfg),
        Commands::Client { .. } => commands::client::handle(cmd, cfg),
        Commands::Object { .. } => commands::object::handle(cmd, cfg),
        Commands::Employee { .. } => commands::employee::handle(cmd, cfg),
        Commands::Service { .. } => commands::service::handle(cmd, cfg),
        Commands::Schedule { .. } => commands::schedule::handle(cmd, cfg),
        Commands::Cost { .. } => commands::cost::handle(cmd, cfg),
        Commands::Dashboard => commands::report::dashboard(cfg),
        Commands::Report { .. } => commands::report::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is read once; a missing file means defaults
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}

//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open an existing, initialized database.
    ///
    /// Fails closed with `StoreUnavailable` when the file is missing, cannot be
    /// opened, or has never been initialized.
    pub fn new(path: &str) -> AppResult<Self> {
        if !Path::new(path).exists() {
            return Err(AppError::StoreUnavailable(format!(
                "database file not found: {path} (run `rcleanops init`)"
            )));
        }

        let conn = Connection::open_with_flags(
            Path::new(path),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AppError::StoreUnavailable(format!("{path}: {e}")))?;

        let pool = Self::configure(conn)?;

        if !pool.is_initialized()? {
            return Err(AppError::StoreUnavailable(format!(
                "database not initialized: {path} (run `rcleanops init`)"
            )));
        }

        Ok(pool)
    }

    /// Open or create the database file (used by `init`).
    pub fn create(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::StoreUnavailable(format!("{path}: {e}")))?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    fn is_initialized(&self) -> AppResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='schedules'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Run `func` inside one transaction.
    ///
    /// Commits when `func` returns `Ok`; any error drops the transaction, which
    /// rolls back every statement issued inside it.
    pub fn transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

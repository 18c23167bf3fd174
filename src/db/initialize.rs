use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Bring the schema up to date and make sure foreign keys are enforced.
///
/// Returns how many migrations were applied; 0 on an already current database.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    let applied = run_pending_migrations(conn)?;

    let fk: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if fk != 1 {
        return Err(AppError::StoreUnavailable(
            "foreign key enforcement is disabled on this connection".to_string(),
        ));
    }

    Ok(applied.len())
}

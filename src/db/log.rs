use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Append one line to the internal `log` table.
///
/// Called inside the same transaction as the write it describes, so a rolled
/// back operation leaves no audit line behind.
pub fn audit(
    conn: &Connection,
    operation: &str,
    target: &str,
    actor: &str,
    message: &str,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, actor, message)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![now, operation, target, actor, message])?;

    Ok(())
}

//! Per-entity SQL. Every function takes a plain `&Connection`, so callers can
//! pass either a connection or an open transaction.

pub mod clients;
pub mod employees;
pub mod objects;
pub mod schedules;
pub mod services;
pub mod users;

use crate::errors::AppError;
use crate::models::entity::Entity;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row};

/// True when a row with this id exists in the entity's table.
pub fn exists(conn: &Connection, entity: Entity, id: i64) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", entity.table());
    Ok(conn
        .query_row(&sql, [id], |_| Ok(()))
        .optional()?
        .is_some())
}

/// `SELECT COUNT(*) FROM <table>`
pub fn count_all(conn: &Connection, entity: Entity) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", entity.table());
    conn.query_row(&sql, [], |row| row.get(0))
}

pub(crate) fn now_str() -> String {
    Local::now().to_rfc3339()
}

pub(crate) fn date_to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub(crate) fn time_to_db(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Wrap a domain parsing failure on column `col` into the error rusqlite
/// expects from a row mapper, carrying that column's real index.
pub(crate) fn conversion_error(row: &Row, col: &str, err: AppError) -> rusqlite::Error {
    match row.as_ref().column_index(col) {
        Ok(idx) => rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)),
        Err(e) => e,
    }
}

/// Optional `YYYY-MM-DD` column.
pub(crate) fn get_opt_date(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(col)? {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_error(row, col, AppError::InvalidDate(raw))),
        None => Ok(None),
    }
}

pub(crate) fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    get_opt_date(row, col)?.ok_or_else(|| {
        conversion_error(row, col, AppError::InvalidDate("NULL".to_string()))
    })
}

/// Optional `HH:MM` column.
pub(crate) fn get_opt_time(row: &Row, col: &str) -> Result<Option<NaiveTime>> {
    match row.get::<_, Option<String>>(col)? {
        Some(raw) => NaiveTime::parse_from_str(&raw, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(row, col, AppError::InvalidTime(raw))),
        None => Ok(None),
    }
}

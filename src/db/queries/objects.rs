use super::{conversion_error, now_str};
use crate::core::cost::ObjectArea;
use crate::errors::AppError;
use crate::models::object::{Object, ObjectListItem};
use crate::models::object_type::ObjectType;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_object(row: &Row) -> Result<Object> {
    let type_str: String = row.get("object_type")?;
    let object_type = ObjectType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(row, "object_type", AppError::InvalidObjectType(type_str.clone())))?;

    Ok(Object {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        area: row.get("area")?,
        object_type,
        access_info: row.get("access_info")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_object(conn: &Connection, o: &Object) -> Result<i64> {
    conn.execute(
        "INSERT INTO objects (client_id, name, address, area, object_type, access_info, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            o.client_id,
            o.name,
            o.address,
            o.area,
            o.object_type.to_db_str(),
            o.access_info,
            o.notes,
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_object(conn: &Connection, o: &Object) -> Result<usize> {
    conn.execute(
        "UPDATE objects
         SET client_id = ?1, name = ?2, address = ?3, area = ?4,
             object_type = ?5, access_info = ?6, notes = ?7
         WHERE id = ?8",
        params![
            o.client_id,
            o.name,
            o.address,
            o.area,
            o.object_type.to_db_str(),
            o.access_info,
            o.notes,
            o.id
        ],
    )
}

pub fn delete_object(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM objects WHERE id = ?1", [id])
}

pub fn get_object(conn: &Connection, id: i64) -> Result<Option<Object>> {
    conn.query_row("SELECT * FROM objects WHERE id = ?1", [id], map_object)
        .optional()
}

/// Pricing lookup: only the area column, read at the moment of the call.
pub fn get_object_area(conn: &Connection, id: i64) -> Result<Option<ObjectArea>> {
    conn.query_row("SELECT area FROM objects WHERE id = ?1", [id], |row| {
        Ok(ObjectArea { area: row.get(0)? })
    })
    .optional()
}

pub fn list_objects(conn: &Connection) -> Result<Vec<ObjectListItem>> {
    let mut stmt = conn.prepare(
        "SELECT o.*, c.full_name AS client_name
         FROM objects o
         JOIN clients c ON c.id = o.client_id
         ORDER BY o.name COLLATE NOCASE, o.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ObjectListItem {
            object: map_object(row)?,
            client_name: row.get("client_name")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_schedules_of_object(conn: &Connection, object_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM schedules WHERE object_id = ?1",
        [object_id],
        |row| row.get(0),
    )
}

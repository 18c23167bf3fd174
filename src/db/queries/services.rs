use super::now_str;
use crate::core::cost::ServicePricing;
use crate::models::service::Service;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_service(row: &Row) -> Result<Service> {
    Ok(Service {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price_per_unit: row.get("price_per_unit")?,
        unit: row.get("unit")?,
        duration_minutes: row.get("duration_minutes")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_service(conn: &Connection, s: &Service) -> Result<i64> {
    conn.execute(
        "INSERT INTO services (name, description, price_per_unit, unit, duration_minutes, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            s.name,
            s.description,
            s.price_per_unit,
            s.unit,
            s.duration_minutes,
            s.notes,
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_service(conn: &Connection, s: &Service) -> Result<usize> {
    conn.execute(
        "UPDATE services
         SET name = ?1, description = ?2, price_per_unit = ?3, unit = ?4,
             duration_minutes = ?5, notes = ?6
         WHERE id = ?7",
        params![
            s.name,
            s.description,
            s.price_per_unit,
            s.unit,
            s.duration_minutes,
            s.notes,
            s.id
        ],
    )
}

pub fn delete_service(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM services WHERE id = ?1", [id])
}

pub fn get_service(conn: &Connection, id: i64) -> Result<Option<Service>> {
    conn.query_row("SELECT * FROM services WHERE id = ?1", [id], map_service)
        .optional()
}

/// Pricing lookup used by the cost deriver.
pub fn get_service_pricing(conn: &Connection, id: i64) -> Result<Option<ServicePricing>> {
    conn.query_row(
        "SELECT price_per_unit, unit FROM services WHERE id = ?1",
        [id],
        |row| {
            Ok(ServicePricing {
                price_per_unit: row.get(0)?,
                unit: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn list_services(conn: &Connection) -> Result<Vec<Service>> {
    let mut stmt = conn.prepare("SELECT * FROM services ORDER BY name COLLATE NOCASE, id")?;
    let rows = stmt.query_map([], map_service)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_schedules_of_service(conn: &Connection, service_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM schedules WHERE service_id = ?1",
        [service_id],
        |row| row.get(0),
    )
}

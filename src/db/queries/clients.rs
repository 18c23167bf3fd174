use super::now_str;
use crate::models::client::{Client, ClientListItem};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_client(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        company_name: row.get("company_name")?,
        contact_person: row.get("contact_person")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_client(conn: &Connection, c: &Client) -> Result<i64> {
    conn.execute(
        "INSERT INTO clients (full_name, phone, email, address, company_name, contact_person, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.full_name,
            c.phone,
            c.email,
            c.address,
            c.company_name,
            c.contact_person,
            c.notes,
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full-row update: every editable column is rewritten.
pub fn update_client(conn: &Connection, c: &Client) -> Result<usize> {
    conn.execute(
        "UPDATE clients
         SET full_name = ?1, phone = ?2, email = ?3, address = ?4,
             company_name = ?5, contact_person = ?6, notes = ?7
         WHERE id = ?8",
        params![
            c.full_name,
            c.phone,
            c.email,
            c.address,
            c.company_name,
            c.contact_person,
            c.notes,
            c.id
        ],
    )
}

pub fn delete_client(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM clients WHERE id = ?1", [id])
}

pub fn get_client(conn: &Connection, id: i64) -> Result<Option<Client>> {
    conn.query_row("SELECT * FROM clients WHERE id = ?1", [id], map_client)
        .optional()
}

pub fn list_clients(conn: &Connection) -> Result<Vec<ClientListItem>> {
    let mut stmt = conn.prepare(
        "SELECT c.*, COUNT(o.id) AS objects_count
         FROM clients c
         LEFT JOIN objects o ON o.client_id = c.id
         GROUP BY c.id
         ORDER BY c.full_name COLLATE NOCASE, c.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ClientListItem {
            client: map_client(row)?,
            objects_count: row.get("objects_count")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_objects_of_client(conn: &Connection, client_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM objects WHERE client_id = ?1",
        [client_id],
        |row| row.get(0),
    )
}

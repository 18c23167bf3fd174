use super::{conversion_error, now_str};
use crate::errors::AppError;
use crate::models::role::Role;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_user(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(row, "role", AppError::InvalidRole(role_str.clone())))?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        role,
    })
}

pub fn insert_user(conn: &Connection, u: &User) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password_hash, full_name, email, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            u.username,
            u.password_hash,
            u.full_name,
            u.email,
            u.role.to_db_str(),
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT * FROM users WHERE username = ?1",
        [username],
        map_user,
    )
    .optional()
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY username")?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_user(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM users WHERE id = ?1", [id])
}

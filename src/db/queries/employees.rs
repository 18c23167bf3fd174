use super::{conversion_error, date_to_db, get_opt_date, now_str};
use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::models::employee_status::EmployeeStatus;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_employee(row: &Row) -> Result<Employee> {
    let status_str: String = row.get("status")?;
    let status = EmployeeStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(row, "status", AppError::InvalidEmployeeStatus(status_str.clone())))?;

    let hire_date = get_opt_date(row, "hire_date")?;

    Ok(Employee {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        position: row.get("position")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        id_document: row.get("id_document")?,
        hire_date,
        salary: row.get("salary")?,
        status,
        notes: row.get("notes")?,
    })
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> Result<i64> {
    conn.execute(
        "INSERT INTO employees (full_name, position, phone, email, id_document, hire_date, salary, status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            e.full_name,
            e.position,
            e.phone,
            e.email,
            e.id_document,
            e.hire_date.as_ref().map(date_to_db),
            e.salary,
            e.status.to_db_str(),
            e.notes,
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_employee(conn: &Connection, e: &Employee) -> Result<usize> {
    conn.execute(
        "UPDATE employees
         SET full_name = ?1, position = ?2, phone = ?3, email = ?4, id_document = ?5,
             hire_date = ?6, salary = ?7, status = ?8, notes = ?9
         WHERE id = ?10",
        params![
            e.full_name,
            e.position,
            e.phone,
            e.email,
            e.id_document,
            e.hire_date.as_ref().map(date_to_db),
            e.salary,
            e.status.to_db_str(),
            e.notes,
            e.id
        ],
    )
}

pub fn delete_employee(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM employees WHERE id = ?1", [id])
}

/// Detach an employee from every work order it was assigned to.
pub fn unassign_schedules(conn: &Connection, employee_id: i64) -> Result<usize> {
    conn.execute(
        "UPDATE schedules SET employee_id = NULL WHERE employee_id = ?1",
        [employee_id],
    )
}

pub fn get_employee(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    conn.query_row("SELECT * FROM employees WHERE id = ?1", [id], map_employee)
        .optional()
}

/// All employees, or only the ones with the given status.
pub fn list_employees(conn: &Connection, status: Option<EmployeeStatus>) -> Result<Vec<Employee>> {
    let mut out = Vec::new();

    match status {
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM employees ORDER BY full_name COLLATE NOCASE, id")?;
            let rows = stmt.query_map([], map_employee)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(s) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM employees WHERE status = ?1 ORDER BY full_name COLLATE NOCASE, id",
            )?;
            let rows = stmt.query_map([s.to_db_str()], map_employee)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

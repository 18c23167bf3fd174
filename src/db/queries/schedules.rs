use super::{conversion_error, date_to_db, get_date, get_opt_time, now_str, time_to_db};
use crate::errors::AppError;
use crate::models::schedule::{Schedule, ScheduleFilter, ScheduleView};
use crate::models::schedule_status::ScheduleStatus;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

/// Joined projection shared by listings, the dashboard and the schedules report.
const VIEW_SELECT: &str = "
    SELECT s.id, s.object_id, s.service_id, s.employee_id, s.scheduled_date, s.scheduled_time,
           s.duration_minutes, s.status, s.cost, s.notes,
           o.name AS object_name, o.address AS object_address,
           c.full_name AS client_name, c.phone AS client_phone,
           srv.name AS service_name, e.full_name AS employee_name
    FROM schedules s
    JOIN objects o ON o.id = s.object_id
    JOIN clients c ON c.id = o.client_id
    JOIN services srv ON srv.id = s.service_id
    LEFT JOIN employees e ON e.id = s.employee_id";

pub fn map_schedule(row: &Row) -> Result<Schedule> {
    let date = get_date(row, "scheduled_date")?;
    let time = get_opt_time(row, "scheduled_time")?;

    let status_str: String = row.get("status")?;
    let status = ScheduleStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(row, "status", AppError::InvalidStatus(status_str.clone())))?;

    Ok(Schedule {
        id: row.get("id")?,
        object_id: row.get("object_id")?,
        service_id: row.get("service_id")?,
        employee_id: row.get("employee_id")?,
        date,
        time,
        duration_minutes: row.get("duration_minutes")?,
        status,
        cost: row.get("cost")?,
        notes: row.get("notes")?,
    })
}

pub fn map_view(row: &Row) -> Result<ScheduleView> {
    Ok(ScheduleView {
        schedule: map_schedule(row)?,
        object_name: row.get("object_name")?,
        object_address: row.get("object_address")?,
        client_name: row.get("client_name")?,
        client_phone: row.get("client_phone")?,
        service_name: row.get("service_name")?,
        employee_name: row.get("employee_name")?,
    })
}

pub fn insert_schedule(conn: &Connection, s: &Schedule) -> Result<i64> {
    conn.execute(
        "INSERT INTO schedules (object_id, service_id, employee_id, scheduled_date, scheduled_time,
                                duration_minutes, status, cost, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            s.object_id,
            s.service_id,
            s.employee_id,
            date_to_db(&s.date),
            s.time.as_ref().map(time_to_db),
            s.duration_minutes,
            s.status.to_db_str(),
            s.cost,
            s.notes,
            now_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full-row update, cost included.
pub fn update_schedule(conn: &Connection, s: &Schedule) -> Result<usize> {
    conn.execute(
        "UPDATE schedules
         SET object_id = ?1, service_id = ?2, employee_id = ?3, scheduled_date = ?4,
             scheduled_time = ?5, duration_minutes = ?6, status = ?7, cost = ?8, notes = ?9
         WHERE id = ?10",
        params![
            s.object_id,
            s.service_id,
            s.employee_id,
            date_to_db(&s.date),
            s.time.as_ref().map(time_to_db),
            s.duration_minutes,
            s.status.to_db_str(),
            s.cost,
            s.notes,
            s.id
        ],
    )
}

pub fn delete_schedule(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM schedules WHERE id = ?1", [id])
}

pub fn get_schedule(conn: &Connection, id: i64) -> Result<Option<Schedule>> {
    conn.query_row("SELECT * FROM schedules WHERE id = ?1", [id], map_schedule)
        .optional()
}

pub fn get_view(conn: &Connection, id: i64) -> Result<Option<ScheduleView>> {
    let sql = format!("{VIEW_SELECT} WHERE s.id = ?1");
    conn.query_row(&sql, [id], map_view).optional()
}

/// Newest first, optionally filtered by status and an inclusive date range.
pub fn list_views(conn: &Connection, filter: &ScheduleFilter) -> Result<Vec<ScheduleView>> {
    let mut sql = format!("{VIEW_SELECT} WHERE 1=1");
    let mut args: Vec<String> = Vec::new();

    if let Some(status) = filter.status {
        args.push(status.to_db_str().to_string());
        sql.push_str(&format!(" AND s.status = ?{}", args.len()));
    }
    if let Some(from) = filter.from {
        args.push(date_to_db(&from));
        sql.push_str(&format!(" AND s.scheduled_date >= ?{}", args.len()));
    }
    if let Some(to) = filter.to {
        args.push(date_to_db(&to));
        sql.push_str(&format!(" AND s.scheduled_date <= ?{}", args.len()));
    }

    sql.push_str(" ORDER BY s.scheduled_date DESC, s.scheduled_time DESC, s.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_view)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Next scheduled work orders from `today` on, soonest first.
pub fn upcoming(conn: &Connection, today: NaiveDate, limit: u32) -> Result<Vec<ScheduleView>> {
    let sql = format!(
        "{VIEW_SELECT}
         WHERE s.status = 'scheduled' AND s.scheduled_date >= ?1
         ORDER BY s.scheduled_date ASC, s.scheduled_time ASC, s.id ASC
         LIMIT ?2"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_db(&today), limit], map_view)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

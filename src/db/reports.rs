//! Aggregate report queries.
//!
//! Revenue is always `SUM(CASE WHEN status = 'completed' THEN COALESCE(cost, 0) ELSE 0 END)`:
//! only completed work orders contribute, and a NULL cost counts as 0.
//! "This month" figures compare against an explicit `today` supplied by the caller.

use crate::db::queries::clients::map_client;
use crate::db::queries::employees::map_employee;
use crate::db::queries::objects::map_object;
use crate::db::queries::get_opt_date;
use crate::db::queries::schedules::{list_views, upcoming};
use crate::db::queries::services::map_service;
use crate::models::report::{
    ClientReport, ClientReportRow, ClientStats, Dashboard, EmployeeReport, EmployeeReportRow,
    EmployeeStats, ObjectReport, ObjectReportRow, ObjectStats, ScheduleReport, ScheduleStats,
    ServiceReport, ServiceReportRow, ServiceStats,
};
use crate::models::schedule::ScheduleFilter;
use crate::utils::date::month_key;
use chrono::NaiveDate;
use rusqlite::{Connection, Params, Result};

const REVENUE: &str =
    "COALESCE(SUM(CASE WHEN s.status = 'completed' THEN COALESCE(s.cost, 0) ELSE 0 END), 0)";

fn scalar_i64<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<i64> {
    conn.query_row(sql, params, |row| row.get::<_, Option<i64>>(0))
        .map(|v| v.unwrap_or(0))
}

fn scalar_f64<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<f64> {
    conn.query_row(sql, params, |row| row.get::<_, Option<f64>>(0))
        .map(|v| v.unwrap_or(0.0))
}

// ---------------------------
// Dashboard
// ---------------------------

pub fn dashboard(conn: &Connection, today: NaiveDate, upcoming_limit: u32) -> Result<Dashboard> {
    let month = month_key(today);

    Ok(Dashboard {
        clients_count: scalar_i64(conn, "SELECT COUNT(*) FROM clients", [])?,
        objects_count: scalar_i64(conn, "SELECT COUNT(*) FROM objects", [])?,
        active_employees_count: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM employees WHERE status = 'active'",
            [],
        )?,
        services_count: scalar_i64(conn, "SELECT COUNT(*) FROM services", [])?,
        scheduled_count: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM schedules WHERE status = 'scheduled'",
            [],
        )?,
        completed_month: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM schedules
             WHERE status = 'completed' AND strftime('%Y-%m', scheduled_date) = ?1",
            [&month],
        )?,
        revenue_month: completed_revenue_in_month(conn, &month)?,
        upcoming: upcoming(conn, today, upcoming_limit)?,
    })
}

fn completed_revenue_in_month(conn: &Connection, month: &str) -> Result<f64> {
    scalar_f64(
        conn,
        "SELECT COALESCE(SUM(COALESCE(cost, 0)), 0) FROM schedules
         WHERE status = 'completed' AND strftime('%Y-%m', scheduled_date) = ?1",
        [month],
    )
}

/// Sum of the cost of every completed work order, NULL counted as 0.
pub fn total_completed_revenue(conn: &Connection) -> Result<f64> {
    scalar_f64(
        conn,
        "SELECT COALESCE(SUM(COALESCE(cost, 0)), 0) FROM schedules WHERE status = 'completed'",
        [],
    )
}

// ---------------------------
// Clients
// ---------------------------

pub fn client_report(conn: &Connection) -> Result<ClientReport> {
    let sql = format!(
        "SELECT c.*,
                COUNT(DISTINCT o.id) AS objects_count,
                COUNT(s.id) AS total_orders,
                {REVENUE} AS total_revenue
         FROM clients c
         LEFT JOIN objects o ON o.client_id = c.id
         LEFT JOIN schedules s ON s.object_id = o.id
         GROUP BY c.id
         ORDER BY c.full_name COLLATE NOCASE, c.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ClientReportRow {
            client: map_client(row)?,
            objects_count: row.get("objects_count")?,
            total_orders: row.get("total_orders")?,
            total_revenue: row.get("total_revenue")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    let stats = ClientStats {
        total: scalar_i64(conn, "SELECT COUNT(*) FROM clients", [])?,
        with_phone: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM clients WHERE phone IS NOT NULL AND phone != ''",
            [],
        )?,
        with_email: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM clients WHERE email IS NOT NULL AND email != ''",
            [],
        )?,
        with_objects: scalar_i64(
            conn,
            "SELECT COUNT(DISTINCT c.id) FROM clients c JOIN objects o ON o.client_id = c.id",
            [],
        )?,
    };

    Ok(ClientReport { rows: out, stats })
}

// ---------------------------
// Objects
// ---------------------------

pub fn object_report(conn: &Connection) -> Result<ObjectReport> {
    let sql = format!(
        "SELECT o.*, c.full_name AS client_name,
                COUNT(s.id) AS total_orders,
                {REVENUE} AS total_revenue,
                MAX(s.scheduled_date) AS last_service_date
         FROM objects o
         JOIN clients c ON c.id = o.client_id
         LEFT JOIN schedules s ON s.object_id = o.id
         GROUP BY o.id
         ORDER BY o.name COLLATE NOCASE, o.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        let last_service_date = get_opt_date(row, "last_service_date")?;
        Ok(ObjectReportRow {
            object: map_object(row)?,
            client_name: row.get("client_name")?,
            total_orders: row.get("total_orders")?,
            total_revenue: row.get("total_revenue")?,
            last_service_date,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    let stats = ObjectStats {
        total: scalar_i64(conn, "SELECT COUNT(*) FROM objects", [])?,
        total_area: scalar_f64(
            conn,
            "SELECT SUM(area) FROM objects WHERE area IS NOT NULL",
            [],
        )?,
        with_services: scalar_i64(
            conn,
            "SELECT COUNT(DISTINCT o.id) FROM objects o
             JOIN schedules s ON s.object_id = o.id
             WHERE s.status = 'completed'",
            [],
        )?,
        types_count: scalar_i64(conn, "SELECT COUNT(DISTINCT object_type) FROM objects", [])?,
    };

    Ok(ObjectReport { rows: out, stats })
}

// ---------------------------
// Employees
// ---------------------------

pub fn employee_report(conn: &Connection) -> Result<EmployeeReport> {
    let sql = format!(
        "SELECT e.*,
                COUNT(s.id) AS total_orders,
                COUNT(CASE WHEN s.status = 'completed' THEN 1 END) AS completed_orders,
                {REVENUE} AS total_revenue
         FROM employees e
         LEFT JOIN schedules s ON s.employee_id = e.id
         GROUP BY e.id
         ORDER BY e.full_name COLLATE NOCASE, e.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(EmployeeReportRow {
            employee: map_employee(row)?,
            total_orders: row.get("total_orders")?,
            completed_orders: row.get("completed_orders")?,
            total_revenue: row.get("total_revenue")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    let stats = EmployeeStats {
        total: scalar_i64(conn, "SELECT COUNT(*) FROM employees", [])?,
        active: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM employees WHERE status = 'active'",
            [],
        )?,
        inactive: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM employees WHERE status = 'inactive'",
            [],
        )?,
        avg_salary: scalar_f64(
            conn,
            "SELECT AVG(salary) FROM employees WHERE salary IS NOT NULL AND status = 'active'",
            [],
        )?,
        total_salary: scalar_f64(
            conn,
            "SELECT SUM(salary) FROM employees WHERE status = 'active'",
            [],
        )?,
    };

    Ok(EmployeeReport { rows: out, stats })
}

// ---------------------------
// Services
// ---------------------------

pub fn service_report(conn: &Connection) -> Result<ServiceReport> {
    let sql = format!(
        "SELECT srv.*,
                COUNT(s.id) AS total_orders,
                COUNT(CASE WHEN s.status = 'completed' THEN 1 END) AS completed_orders,
                {REVENUE} AS total_revenue
         FROM services srv
         LEFT JOIN schedules s ON s.service_id = srv.id
         GROUP BY srv.id
         ORDER BY srv.name COLLATE NOCASE, srv.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ServiceReportRow {
            service: map_service(row)?,
            total_orders: row.get("total_orders")?,
            completed_orders: row.get("completed_orders")?,
            total_revenue: row.get("total_revenue")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    let stats = ServiceStats {
        total: scalar_i64(conn, "SELECT COUNT(*) FROM services", [])?,
        avg_price: scalar_f64(
            conn,
            "SELECT AVG(price_per_unit) FROM services WHERE price_per_unit IS NOT NULL",
            [],
        )?,
        total_revenue: total_completed_revenue(conn)?,
        completed_orders: scalar_i64(
            conn,
            "SELECT COUNT(*) FROM schedules WHERE status = 'completed'",
            [],
        )?,
    };

    Ok(ServiceReport { rows: out, stats })
}

// ---------------------------
// Schedules
// ---------------------------

pub fn schedule_report(
    conn: &Connection,
    filter: &ScheduleFilter,
    today: NaiveDate,
) -> Result<ScheduleReport> {
    let rows = list_views(conn, filter)?;
    let month = month_key(today);

    let count_status = |status: &str| {
        scalar_i64(
            conn,
            "SELECT COUNT(*) FROM schedules WHERE status = ?1",
            [status],
        )
    };

    let stats = ScheduleStats {
        total: scalar_i64(conn, "SELECT COUNT(*) FROM schedules", [])?,
        scheduled: count_status("scheduled")?,
        completed: count_status("completed")?,
        cancelled: count_status("cancelled")?,
        total_revenue: total_completed_revenue(conn)?,
        revenue_month: completed_revenue_in_month(conn, &month)?,
        avg_order_cost: scalar_f64(
            conn,
            "SELECT AVG(cost) FROM schedules WHERE status = 'completed' AND cost IS NOT NULL",
            [],
        )?,
    };

    Ok(ScheduleReport { rows, stats })
}

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            actor     TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

const INITIAL_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        username       TEXT NOT NULL UNIQUE,
        password_hash  TEXT NOT NULL,
        full_name      TEXT NOT NULL,
        email          TEXT,
        role           TEXT NOT NULL DEFAULT 'manager' CHECK(role IN ('manager','admin')),
        created_at     TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS clients (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name       TEXT NOT NULL,
        phone           TEXT,
        email           TEXT,
        address         TEXT,
        company_name    TEXT,
        contact_person  TEXT,
        notes           TEXT,
        created_at      TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS objects (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id    INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
        name         TEXT NOT NULL,
        address      TEXT NOT NULL,
        area         REAL CHECK(area IS NULL OR area > 0),
        object_type  TEXT NOT NULL DEFAULT 'office'
                     CHECK(object_type IN ('office','apartment','house','warehouse','retail','industrial','other')),
        access_info  TEXT,
        notes        TEXT,
        created_at   TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS employees (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name    TEXT NOT NULL,
        position     TEXT,
        phone        TEXT,
        email        TEXT,
        id_document  TEXT,
        hire_date    TEXT,
        salary       REAL CHECK(salary IS NULL OR salary >= 0),
        status       TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','inactive')),
        notes        TEXT,
        created_at   TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS services (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        name              TEXT NOT NULL,
        description       TEXT,
        price_per_unit    REAL CHECK(price_per_unit IS NULL OR price_per_unit >= 0),
        unit              TEXT,
        duration_minutes  INTEGER CHECK(duration_minutes IS NULL OR duration_minutes >= 0),
        notes             TEXT,
        created_at        TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS schedules (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        object_id         INTEGER NOT NULL REFERENCES objects(id) ON DELETE RESTRICT,
        service_id        INTEGER NOT NULL REFERENCES services(id) ON DELETE RESTRICT,
        employee_id       INTEGER REFERENCES employees(id) ON DELETE SET NULL,
        scheduled_date    TEXT NOT NULL,
        scheduled_time    TEXT,
        duration_minutes  INTEGER CHECK(duration_minutes IS NULL OR duration_minutes >= 0),
        status            TEXT NOT NULL DEFAULT 'scheduled'
                          CHECK(status IN ('scheduled','completed','cancelled')),
        cost              REAL CHECK(cost IS NULL OR cost >= 0),
        notes             TEXT,
        created_at        TEXT NOT NULL
    );
"#;

const INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_objects_client       ON objects(client_id);
    CREATE INDEX IF NOT EXISTS idx_schedules_object     ON schedules(object_id);
    CREATE INDEX IF NOT EXISTS idx_schedules_service    ON schedules(service_id);
    CREATE INDEX IF NOT EXISTS idx_schedules_employee   ON schedules(employee_id);
    CREATE INDEX IF NOT EXISTS idx_schedules_date_time  ON schedules(scheduled_date, scheduled_time);
    CREATE INDEX IF NOT EXISTS idx_schedules_status     ON schedules(status);
"#;

/// Ordered list of (version, description, sql).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250310_0001_initial_schema",
        "Created users, clients, objects, employees, services and schedules tables",
        INITIAL_SCHEMA,
    ),
    (
        "20250310_0002_lookup_indexes",
        "Added foreign-key and report lookup indexes",
        INDEXES,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(conn: &Connection, version: &str, description: &str, sql: &str) -> AppResult<()> {
    conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            AppError::Migration(format!("{version}: {e}"))
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, actor, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'system', ?2)",
        params![version, description],
    )?;

    success(format!("Migration applied: {} → {}", version, description));
    Ok(())
}

/// Names of the migrations already recorded in the log, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Run every migration not yet recorded in the log, in order.
/// Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for (version, description, sql) in MIGRATIONS {
        if !is_applied(conn, version)? {
            apply_migration(conn, version, description, sql)?;
            applied.push(*version);
        }
    }

    Ok(applied)
}

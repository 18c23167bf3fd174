use crate::db::pool::DbPool;
use crate::db::queries::{clients, employees, objects, schedules, services};
use crate::errors::AppResult;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    ClientExport, EmployeeExport, ExportRow, ObjectExport, ScheduleExport, ServiceExport,
};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::schedule::ScheduleFilter;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write every row of `target` to `file` in `format`.
    ///
    /// `file` must be absolute. An existing file is replaced only with `force`
    /// or after confirmation. Returns the number of rows written; nothing is
    /// written when the table is empty.
    pub fn export(
        pool: &DbPool,
        target: ExportTarget,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_absolute(path)?;
        ensure_writable(path, force)?;

        let conn = &pool.conn;
        match target {
            ExportTarget::Clients => {
                let rows: Vec<ClientExport> = clients::list_clients(conn)?
                    .into_iter()
                    .map(ClientExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Objects => {
                let rows: Vec<ObjectExport> = objects::list_objects(conn)?
                    .into_iter()
                    .map(ObjectExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Employees => {
                let rows: Vec<EmployeeExport> = employees::list_employees(conn, None)?
                    .into_iter()
                    .map(EmployeeExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Services => {
                let rows: Vec<ServiceExport> = services::list_services(conn)?
                    .into_iter()
                    .map(ServiceExport::from)
                    .collect();
                write_rows(&rows, target, format, path)
            }
            ExportTarget::Schedules => {
                let rows: Vec<ScheduleExport> =
                    schedules::list_views(conn, &ScheduleFilter::default())?
                        .into_iter()
                        .map(ScheduleExport::from)
                        .collect();
                write_rows(&rows, target, format, path)
            }
        }
    }
}

fn write_rows<T: ExportRow>(
    rows: &[T],
    target: ExportTarget,
    format: ExportFormat,
    path: &Path,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning(format!("No {} to export.", target.as_str()));
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, target.as_str(), path)?,
    }

    Ok(rows.len())
}

use crate::core::schedule::check_range;
use crate::db::pool::DbPool;
use crate::db::reports;
use crate::errors::AppResult;
use crate::models::report::{
    ClientReport, Dashboard, EmployeeReport, ObjectReport, ScheduleReport, ServiceReport,
};
use crate::models::schedule::ScheduleFilter;
use chrono::NaiveDate;

/// Read-only aggregates. `today` decides what "this month" and "upcoming" mean.
pub struct ReportLogic;

impl ReportLogic {
    pub fn dashboard(pool: &DbPool, today: NaiveDate, upcoming_limit: u32) -> AppResult<Dashboard> {
        Ok(reports::dashboard(&pool.conn, today, upcoming_limit)?)
    }

    pub fn clients(pool: &DbPool) -> AppResult<ClientReport> {
        Ok(reports::client_report(&pool.conn)?)
    }

    pub fn objects(pool: &DbPool) -> AppResult<ObjectReport> {
        Ok(reports::object_report(&pool.conn)?)
    }

    pub fn employees(pool: &DbPool) -> AppResult<EmployeeReport> {
        Ok(reports::employee_report(&pool.conn)?)
    }

    pub fn services(pool: &DbPool) -> AppResult<ServiceReport> {
        Ok(reports::service_report(&pool.conn)?)
    }

    pub fn schedules(
        pool: &DbPool,
        filter: &ScheduleFilter,
        today: NaiveDate,
    ) -> AppResult<ScheduleReport> {
        check_range(filter)?;
        Ok(reports::schedule_report(&pool.conn, filter, today)?)
    }
}

use crate::core::cost::{CostDeriver, CostQuote};
use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{employees, exists, schedules};
use crate::errors::{AppError, AppResult};
use crate::models::employee_status::EmployeeStatus;
use crate::models::entity::Entity;
use crate::models::schedule::{Schedule, ScheduleDraft, ScheduleFilter, ScheduleView};
use crate::utils::numeric::round2;
use rusqlite::Connection;

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: Entity::Schedule,
        id,
    }
}

fn require_ref(conn: &Connection, entity: Entity, id: i64) -> AppResult<()> {
    if !exists(conn, entity, id)? {
        return Err(AppError::ReferenceNotFound { entity, id });
    }
    Ok(())
}

/// Outcome of a successful `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSchedule {
    pub id: i64,
    /// Cost as stored (2 decimals) and the rule that produced it.
    pub quote: CostQuote,
    /// The assigned employee is marked inactive.
    pub employee_inactive: bool,
}

/// A date filter whose start falls after its end is an input error, not an
/// empty result.
pub fn check_range(filter: &ScheduleFilter) -> AppResult<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(AppError::InvalidDate(format!(
            "range start {from} is after range end {to}"
        )));
    }
    Ok(())
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Insert (`id == None`) or fully rewrite a work order.
    ///
    /// Every reference is checked and the cost derived inside the same
    /// transaction as the write, so nothing is persisted when any step fails.
    pub fn save(
        pool: &mut DbPool,
        session: &Session,
        deriver: &CostDeriver,
        id: Option<i64>,
        draft: &ScheduleDraft,
    ) -> AppResult<SavedSchedule> {
        if let Some(minutes) = draft.duration_minutes
            && minutes < 0
        {
            return Err(AppError::InvalidNumeric {
                field: "duration",
                value: minutes.to_string(),
            });
        }

        pool.transaction(|conn| {
            if let Some(existing) = id
                && !exists(conn, Entity::Schedule, existing)?
            {
                return Err(not_found(existing));
            }

            require_ref(conn, Entity::Object, draft.object_id)?;
            require_ref(conn, Entity::Service, draft.service_id)?;

            let mut employee_inactive = false;
            if let Some(emp_id) = draft.employee_id {
                let employee =
                    employees::get_employee(conn, emp_id)?.ok_or(AppError::ReferenceNotFound {
                        entity: Entity::Employee,
                        id: emp_id,
                    })?;
                employee_inactive = employee.status == EmployeeStatus::Inactive;
            }

            let mut quote = deriver.quote(
                conn,
                draft.object_id,
                draft.service_id,
                draft.explicit_cost.as_deref(),
            )?;
            quote.cost = quote.cost.map(round2);

            let mut row = Schedule {
                id: id.unwrap_or(0),
                object_id: draft.object_id,
                service_id: draft.service_id,
                employee_id: draft.employee_id,
                date: draft.date,
                time: draft.time,
                duration_minutes: draft.duration_minutes,
                status: draft.status,
                cost: quote.cost,
                notes: draft.notes.clone(),
            };

            let (operation, verb) = match id {
                Some(_) => {
                    schedules::update_schedule(conn, &row)?;
                    ("edit", "Updated")
                }
                None => {
                    row.id = schedules::insert_schedule(conn, &row)?;
                    ("add", "Added")
                }
            };

            audit(
                conn,
                operation,
                &format!("schedule #{}", row.id),
                &session.username,
                &format!(
                    "{verb} work order on {} ({}, cost {})",
                    row.date_str(),
                    row.status.to_db_str(),
                    quote.origin
                ),
            )?;

            Ok(SavedSchedule {
                id: row.id,
                quote,
                employee_inactive,
            })
        })
    }

    /// Run the cost derivation without writing anything.
    pub fn preview(
        pool: &DbPool,
        deriver: &CostDeriver,
        object_id: i64,
        service_id: i64,
        explicit_cost: Option<&str>,
    ) -> AppResult<CostQuote> {
        deriver.quote(&pool.conn, object_id, service_id, explicit_cost)
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<Schedule> {
        pool.transaction(|conn| {
            let schedule = schedules::get_schedule(conn, id)?.ok_or_else(|| not_found(id))?;
            schedules::delete_schedule(conn, id)?;
            audit(
                conn,
                "del",
                &format!("schedule #{id}"),
                &session.username,
                &format!("Deleted work order on {}", schedule.date_str()),
            )?;
            Ok(schedule)
        })
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<ScheduleView> {
        schedules::get_view(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(pool: &DbPool, filter: &ScheduleFilter) -> AppResult<Vec<ScheduleView>> {
        check_range(filter)?;
        Ok(schedules::list_views(&pool.conn, filter)?)
    }
}

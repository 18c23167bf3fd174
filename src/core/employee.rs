use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::employees;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::employee_status::EmployeeStatus;
use crate::models::entity::Entity;

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: Entity::Employee,
        id,
    }
}

fn validate(e: &Employee) -> AppResult<()> {
    if e.full_name.trim().is_empty() {
        return Err(AppError::MissingField("full_name"));
    }
    if let Some(salary) = e.salary
        && !(salary.is_finite() && salary >= 0.0)
    {
        return Err(AppError::InvalidNumeric {
            field: "salary",
            value: salary.to_string(),
        });
    }
    Ok(())
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn add(pool: &mut DbPool, session: &Session, employee: &Employee) -> AppResult<i64> {
        validate(employee)?;

        pool.transaction(|conn| {
            let id = employees::insert_employee(conn, employee)?;
            audit(
                conn,
                "add",
                &format!("employee #{id}"),
                &session.username,
                &format!("Added employee '{}'", employee.full_name),
            )?;
            Ok(id)
        })
    }

    pub fn edit(pool: &mut DbPool, session: &Session, employee: &Employee) -> AppResult<()> {
        validate(employee)?;

        pool.transaction(|conn| {
            if employees::update_employee(conn, employee)? == 0 {
                return Err(not_found(employee.id));
            }
            audit(
                conn,
                "edit",
                &format!("employee #{}", employee.id),
                &session.username,
                &format!(
                    "Updated employee '{}' ({})",
                    employee.full_name,
                    employee.status.to_db_str()
                ),
            )
        })
    }

    /// Work orders assigned to the employee stay, unassigned.
    /// Returns the deleted row and the number of orders that lost their assignee.
    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<(Employee, usize)> {
        pool.transaction(|conn| {
            let employee = employees::get_employee(conn, id)?.ok_or_else(|| not_found(id))?;

            let unassigned = employees::unassign_schedules(conn, id)?;
            employees::delete_employee(conn, id)?;
            audit(
                conn,
                "del",
                &format!("employee #{id}"),
                &session.username,
                &format!(
                    "Deleted employee '{}', {unassigned} work order(s) unassigned",
                    employee.full_name
                ),
            )?;
            Ok((employee, unassigned))
        })
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Employee> {
        employees::get_employee(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Employee>> {
        Ok(employees::list_employees(&pool.conn, None)?)
    }

    pub fn list_active(pool: &DbPool) -> AppResult<Vec<Employee>> {
        Ok(employees::list_employees(
            &pool.conn,
            Some(EmployeeStatus::Active),
        )?)
    }
}

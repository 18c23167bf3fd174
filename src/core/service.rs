use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::services;
use crate::errors::{AppError, AppResult};
use crate::models::entity::Entity;
use crate::models::service::Service;

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: Entity::Service,
        id,
    }
}

fn validate(s: &Service) -> AppResult<()> {
    if s.name.trim().is_empty() {
        return Err(AppError::MissingField("name"));
    }
    if let Some(price) = s.price_per_unit
        && !(price.is_finite() && price >= 0.0)
    {
        return Err(AppError::InvalidNumeric {
            field: "price",
            value: price.to_string(),
        });
    }
    if let Some(minutes) = s.duration_minutes
        && minutes < 0
    {
        return Err(AppError::InvalidNumeric {
            field: "duration",
            value: minutes.to_string(),
        });
    }
    Ok(())
}

pub struct ServiceLogic;

impl ServiceLogic {
    pub fn add(pool: &mut DbPool, session: &Session, service: &Service) -> AppResult<i64> {
        validate(service)?;

        pool.transaction(|conn| {
            let id = services::insert_service(conn, service)?;
            audit(
                conn,
                "add",
                &format!("service #{id}"),
                &session.username,
                &format!("Added service '{}'", service.name),
            )?;
            Ok(id)
        })
    }

    /// Existing work orders keep the cost they were saved with.
    pub fn edit(pool: &mut DbPool, session: &Session, service: &Service) -> AppResult<()> {
        validate(service)?;

        pool.transaction(|conn| {
            if services::update_service(conn, service)? == 0 {
                return Err(not_found(service.id));
            }
            audit(
                conn,
                "edit",
                &format!("service #{}", service.id),
                &session.username,
                &format!("Updated service '{}'", service.name),
            )
        })
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<Service> {
        pool.transaction(|conn| {
            let service = services::get_service(conn, id)?.ok_or_else(|| not_found(id))?;

            let orders = services::count_schedules_of_service(conn, id)?;
            if orders > 0 {
                return Err(AppError::DeleteRestricted {
                    entity: Entity::Service,
                    id,
                    dependents: orders,
                    dependent_entity: Entity::Schedule,
                });
            }

            services::delete_service(conn, id)?;
            audit(
                conn,
                "del",
                &format!("service #{id}"),
                &session.username,
                &format!("Deleted service '{}'", service.name),
            )?;
            Ok(service)
        })
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Service> {
        services::get_service(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Service>> {
        Ok(services::list_services(&pool.conn)?)
    }
}

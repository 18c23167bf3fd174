use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{exists, objects};
use crate::errors::{AppError, AppResult};
use crate::models::entity::Entity;
use crate::models::object::{Object, ObjectListItem};
use rusqlite::Connection;

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: Entity::Object,
        id,
    }
}

fn validate(o: &Object) -> AppResult<()> {
    if o.name.trim().is_empty() {
        return Err(AppError::MissingField("name"));
    }
    if o.address.trim().is_empty() {
        return Err(AppError::MissingField("address"));
    }
    if let Some(area) = o.area
        && !(area.is_finite() && area > 0.0)
    {
        return Err(AppError::InvalidNumeric {
            field: "area",
            value: area.to_string(),
        });
    }
    Ok(())
}

fn check_client(conn: &Connection, client_id: i64) -> AppResult<()> {
    if !exists(conn, Entity::Client, client_id)? {
        return Err(AppError::ReferenceNotFound {
            entity: Entity::Client,
            id: client_id,
        });
    }
    Ok(())
}

pub struct ObjectLogic;

impl ObjectLogic {
    pub fn add(pool: &mut DbPool, session: &Session, object: &Object) -> AppResult<i64> {
        validate(object)?;

        pool.transaction(|conn| {
            check_client(conn, object.client_id)?;
            let id = objects::insert_object(conn, object)?;
            audit(
                conn,
                "add",
                &format!("object #{id}"),
                &session.username,
                &format!(
                    "Added object '{}' for client #{}",
                    object.name, object.client_id
                ),
            )?;
            Ok(id)
        })
    }

    pub fn edit(pool: &mut DbPool, session: &Session, object: &Object) -> AppResult<()> {
        validate(object)?;

        pool.transaction(|conn| {
            if !exists(conn, Entity::Object, object.id)? {
                return Err(not_found(object.id));
            }
            check_client(conn, object.client_id)?;
            objects::update_object(conn, object)?;
            audit(
                conn,
                "edit",
                &format!("object #{}", object.id),
                &session.username,
                &format!("Updated object '{}'", object.name),
            )
        })
    }

    /// Refused while work orders still point at the object.
    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<Object> {
        pool.transaction(|conn| {
            let object = objects::get_object(conn, id)?.ok_or_else(|| not_found(id))?;

            let orders = objects::count_schedules_of_object(conn, id)?;
            if orders > 0 {
                return Err(AppError::DeleteRestricted {
                    entity: Entity::Object,
                    id,
                    dependents: orders,
                    dependent_entity: Entity::Schedule,
                });
            }

            objects::delete_object(conn, id)?;
            audit(
                conn,
                "del",
                &format!("object #{id}"),
                &session.username,
                &format!("Deleted object '{}'", object.name),
            )?;
            Ok(object)
        })
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Object> {
        objects::get_object(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<ObjectListItem>> {
        Ok(objects::list_objects(&pool.conn)?)
    }
}

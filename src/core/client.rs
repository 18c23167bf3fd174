use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::clients;
use crate::errors::{AppError, AppResult};
use crate::models::client::{Client, ClientListItem};
use crate::models::entity::Entity;

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: Entity::Client,
        id,
    }
}

fn validate(c: &Client) -> AppResult<()> {
    if c.full_name.trim().is_empty() {
        return Err(AppError::MissingField("full_name"));
    }
    Ok(())
}

pub struct ClientLogic;

impl ClientLogic {
    pub fn add(pool: &mut DbPool, session: &Session, client: &Client) -> AppResult<i64> {
        validate(client)?;

        pool.transaction(|conn| {
            let id = clients::insert_client(conn, client)?;
            audit(
                conn,
                "add",
                &format!("client #{id}"),
                &session.username,
                &format!("Added client '{}'", client.full_name),
            )?;
            Ok(id)
        })
    }

    /// Rewrites every column of the row with the values in `client`.
    pub fn edit(pool: &mut DbPool, session: &Session, client: &Client) -> AppResult<()> {
        validate(client)?;

        pool.transaction(|conn| {
            if clients::update_client(conn, client)? == 0 {
                return Err(not_found(client.id));
            }
            audit(
                conn,
                "edit",
                &format!("client #{}", client.id),
                &session.username,
                &format!("Updated client '{}'", client.full_name),
            )
        })
    }

    /// Refused while the client still owns objects.
    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<Client> {
        pool.transaction(|conn| {
            let client = clients::get_client(conn, id)?.ok_or_else(|| not_found(id))?;

            let owned = clients::count_objects_of_client(conn, id)?;
            if owned > 0 {
                return Err(AppError::DeleteRestricted {
                    entity: Entity::Client,
                    id,
                    dependents: owned,
                    dependent_entity: Entity::Object,
                });
            }

            clients::delete_client(conn, id)?;
            audit(
                conn,
                "del",
                &format!("client #{id}"),
                &session.username,
                &format!("Deleted client '{}'", client.full_name),
            )?;
            Ok(client)
        })
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Client> {
        clients::get_client(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<ClientListItem>> {
        Ok(clients::list_clients(&pool.conn)?)
    }
}

use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::users;
use crate::errors::{AppError, AppResult};
use crate::models::entity::Entity;
use crate::models::role::Role;
use crate::models::user::User;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Fields accepted by `user register`.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Role,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::PasswordHash(e.to_string())),
    }
}

pub struct UserLogic;

impl UserLogic {
    pub fn register(pool: &mut DbPool, input: &NewUser) -> AppResult<i64> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(AppError::MissingField("username"));
        }
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::MissingField("full_name"));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let password_hash = hash_password(&input.password)?;

        pool.transaction(|conn| {
            if users::find_by_username(conn, username)?.is_some() {
                return Err(AppError::UsernameTaken(username.to_string()));
            }

            let user = User {
                id: 0,
                username: username.to_string(),
                password_hash,
                full_name: full_name.to_string(),
                email: input.email.clone(),
                role: input.role,
            };
            let id = users::insert_user(conn, &user)?;

            audit(
                conn,
                "register",
                &format!("user #{id}"),
                username,
                &format!("Registered user '{username}' ({})", input.role.to_db_str()),
            )?;
            Ok(id)
        })
    }

    /// Check the credentials. Unknown usernames and wrong passwords look the same.
    pub fn authenticate(pool: &mut DbPool, username: &str, password: &str) -> AppResult<User> {
        let user = users::find_by_username(&pool.conn, username.trim())?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        audit(
            &pool.conn,
            "login",
            &format!("user #{}", user.id),
            &user.username,
            "Operator logged in",
        )?;
        Ok(user)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<User>> {
        Ok(users::list_users(&pool.conn)?)
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<User> {
        pool.transaction(|conn| {
            let user = users::get_user(conn, id)?.ok_or(AppError::NotFound {
                entity: Entity::User,
                id,
            })?;
            users::delete_user(conn, id)?;
            audit(
                conn,
                "del",
                &format!("user #{id}"),
                &session.username,
                &format!("Deleted user '{}'", user.username),
            )?;
            Ok(user)
        })
    }
}

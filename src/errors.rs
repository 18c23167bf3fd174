//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::entity::Entity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Referential integrity
    // ---------------------------
    #[error("{entity} #{id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("Referenced {entity} #{id} does not exist")]
    ReferenceNotFound { entity: Entity, id: i64 },

    #[error("Cannot delete {entity} #{id}: {dependents} {dependent_entity} record(s) still reference it")]
    DeleteRestricted {
        entity: Entity,
        id: i64,
        dependents: i64,
        dependent_entity: Entity,
    },

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number for '{field}': {value}")]
    InvalidNumeric { field: &'static str, value: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid schedule status: {0}")]
    InvalidStatus(String),

    #[error("Invalid employee status: {0}")]
    InvalidEmployeeStatus(String),

    #[error("Invalid object type: {0}")]
    InvalidObjectType(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Session / accounts
    // ---------------------------
    #[error("Login required: run `rcleanops user login` first")]
    NotAuthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

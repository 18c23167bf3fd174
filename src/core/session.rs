//! Operator session kept in a small YAML file next to the database.
//!
//! `user login` writes it, `user logout` removes it, and every data command
//! loads it so that audit lines carry the operator's username.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub logged_in_at: String,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            logged_in_at: Local::now().to_rfc3339(),
        }
    }

    /// Actor used for internal operations run without an operator (migrations, init).
    pub fn system() -> Self {
        Self {
            user_id: 0,
            username: "system".to_string(),
            full_name: "System".to_string(),
            role: Role::Admin,
            logged_in_at: Local::now().to_rfc3339(),
        }
    }

    /// `<database>.session`
    pub fn file_for(db_path: &str) -> PathBuf {
        PathBuf::from(format!("{db_path}.session"))
    }

    pub fn save(&self, db_path: &str) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::file_for(db_path), yaml)?;
        Ok(())
    }

    pub fn load(db_path: &str) -> AppResult<Option<Self>> {
        let path = Self::file_for(db_path);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    /// Load the session or fail with `NotAuthenticated`.
    pub fn require(db_path: &str) -> AppResult<Self> {
        Self::load(db_path)?.ok_or(AppError::NotAuthenticated)
    }

    /// Remove the session file. Returns false when nobody was logged in.
    pub fn clear(db_path: &str) -> AppResult<bool> {
        let path = Self::file_for(db_path);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

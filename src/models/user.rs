use super::role::Role;
use serde::Serialize;

/// Operator account. The password hash never leaves the `db` layer in listings.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Role,
}

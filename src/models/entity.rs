use serde::Serialize;
use std::fmt;

/// The persisted entity kinds, used for error reporting and generic lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Entity {
    Client,
    Object,
    Employee,
    Service,
    Schedule,
    User,
}

impl Entity {
    /// Table backing this entity.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Client => "clients",
            Entity::Object => "objects",
            Entity::Employee => "employees",
            Entity::Service => "services",
            Entity::Schedule => "schedules",
            Entity::User => "users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Entity::Client => "client",
            Entity::Object => "object",
            Entity::Employee => "employee",
            Entity::Service => "service",
            Entity::Schedule => "schedule",
            Entity::User => "user",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Serviced sites ("objects") owned by a client.

use super::object_type::ObjectType;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Object {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub address: String,
    /// Square measure of the site; always > 0 when present.
    pub area: Option<f64>,
    pub object_type: ObjectType,
    pub access_info: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectListItem {
    pub object: Object,
    pub client_name: String,
}

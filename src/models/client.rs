//! Client rows and list projections.

use serde::Serialize;

/// A customer of the company. `id == 0` marks a row not yet inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Client {
    pub id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

/// Client plus the number of sites it owns.
#[derive(Debug, Clone, Serialize)]
pub struct ClientListItem {
    pub client: Client,
    pub objects_count: i64,
}

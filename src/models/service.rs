use serde::Serialize;

/// Catalog entry. `unit` decides how the cost of a work order is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_per_unit: Option<f64>,
    pub unit: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

use super::employee_status::EmployeeStatus;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Identity-document reference (passport number or similar).
    pub id_document: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    pub notes: Option<String>,
}

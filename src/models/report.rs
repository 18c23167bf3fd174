//! Aggregate figures produced by the report queries.
//! Every revenue figure counts completed work orders only, with a NULL cost as 0.

use super::client::Client;
use super::employee::Employee;
use super::object::Object;
use super::schedule::ScheduleView;
use super::service::Service;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub clients_count: i64,
    pub objects_count: i64,
    pub active_employees_count: i64,
    pub services_count: i64,
    pub scheduled_count: i64,
    pub completed_month: i64,
    pub revenue_month: f64,
    pub upcoming: Vec<ScheduleView>,
}

// ---------------------------
// Clients
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ClientReportRow {
    pub client: Client,
    pub objects_count: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientStats {
    pub total: i64,
    pub with_phone: i64,
    pub with_email: i64,
    pub with_objects: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientReport {
    pub rows: Vec<ClientReportRow>,
    pub stats: ClientStats,
}

// ---------------------------
// Objects
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ObjectReportRow {
    pub object: Object,
    pub client_name: String,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub last_service_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectStats {
    pub total: i64,
    pub total_area: f64,
    pub with_services: i64,
    pub types_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    pub rows: Vec<ObjectReportRow>,
    pub stats: ObjectStats,
}

// ---------------------------
// Employees
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeReportRow {
    pub employee: Employee,
    pub total_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    /// Average over active employees with a recorded salary.
    pub avg_salary: f64,
    pub total_salary: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeReport {
    pub rows: Vec<EmployeeReportRow>,
    pub stats: EmployeeStats,
}

// ---------------------------
// Services
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ServiceReportRow {
    pub service: Service,
    pub total_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceStats {
    pub total: i64,
    pub avg_price: f64,
    pub total_revenue: f64,
    pub completed_orders: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    pub rows: Vec<ServiceReportRow>,
    pub stats: ServiceStats,
}

// ---------------------------
// Schedules
// ---------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleStats {
    pub total: i64,
    pub scheduled: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub total_revenue: f64,
    pub revenue_month: f64,
    /// Average cost of completed orders that carry a cost.
    pub avg_order_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub rows: Vec<ScheduleView>,
    pub stats: ScheduleStats,
}

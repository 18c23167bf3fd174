//! Flat export rows, one per target table.

use crate::models::client::ClientListItem;
use crate::models::employee::Employee;
use crate::models::object::ObjectListItem;
use crate::models::schedule::ScheduleView;
use crate::models::service::Service;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Typed cell value for the XLSX writer.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Date(NaiveDate),
    Time(NaiveTime),
    Empty,
}

impl Cell {
    fn text(v: &Option<String>) -> Self {
        v.as_ref().map_or(Cell::Empty, |s| Cell::Text(s.clone()))
    }

    fn number(v: Option<f64>) -> Self {
        v.map_or(Cell::Empty, Cell::Number)
    }

    fn integer(v: Option<i64>) -> Self {
        v.map_or(Cell::Empty, Cell::Integer)
    }
}

/// A row that can be written as CSV/JSON (through serde) and as XLSX.
pub trait ExportRow: Serialize {
    /// Column names, in the same order as the struct fields and `cells()`.
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<Cell>;
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ---------------------------
// Clients
// ---------------------------

#[derive(Serialize, Clone, Debug)]
pub struct ClientExport {
    pub id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub objects_count: i64,
    pub notes: Option<String>,
}

impl From<ClientListItem> for ClientExport {
    fn from(item: ClientListItem) -> Self {
        let c = item.client;
        Self {
            id: c.id,
            full_name: c.full_name,
            phone: c.phone,
            email: c.email,
            address: c.address,
            company_name: c.company_name,
            contact_person: c.contact_person,
            objects_count: item.objects_count,
            notes: c.notes,
        }
    }
}

impl ExportRow for ClientExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "full_name",
            "phone",
            "email",
            "address",
            "company_name",
            "contact_person",
            "objects_count",
            "notes",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Text(self.full_name.clone()),
            Cell::text(&self.phone),
            Cell::text(&self.email),
            Cell::text(&self.address),
            Cell::text(&self.company_name),
            Cell::text(&self.contact_person),
            Cell::Integer(self.objects_count),
            Cell::text(&self.notes),
        ]
    }
}

// ---------------------------
// Objects
// ---------------------------

#[derive(Serialize, Clone, Debug)]
pub struct ObjectExport {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub name: String,
    pub address: String,
    pub area: Option<f64>,
    pub object_type: String,
    pub access_info: Option<String>,
    pub notes: Option<String>,
}

impl From<ObjectListItem> for ObjectExport {
    fn from(item: ObjectListItem) -> Self {
        let o = item.object;
        Self {
            id: o.id,
            client_id: o.client_id,
            client_name: item.client_name,
            name: o.name,
            address: o.address,
            area: o.area,
            object_type: o.object_type.to_db_str().to_string(),
            access_info: o.access_info,
            notes: o.notes,
        }
    }
}

impl ExportRow for ObjectExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "client_id",
            "client_name",
            "name",
            "address",
            "area",
            "object_type",
            "access_info",
            "notes",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Integer(self.client_id),
            Cell::Text(self.client_name.clone()),
            Cell::Text(self.name.clone()),
            Cell::Text(self.address.clone()),
            Cell::number(self.area),
            Cell::Text(self.object_type.clone()),
            Cell::text(&self.access_info),
            Cell::text(&self.notes),
        ]
    }
}

// ---------------------------
// Employees
// ---------------------------

#[derive(Serialize, Clone, Debug)]
pub struct EmployeeExport {
    pub id: i64,
    pub full_name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub id_document: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    #[serde(skip)]
    hire_date_value: Option<NaiveDate>,
}

impl From<Employee> for EmployeeExport {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            full_name: e.full_name,
            position: e.position,
            phone: e.phone,
            email: e.email,
            id_document: e.id_document,
            hire_date: e.hire_date.map(fmt_date),
            salary: e.salary,
            status: e.status.to_db_str().to_string(),
            notes: e.notes,
            hire_date_value: e.hire_date,
        }
    }
}

impl ExportRow for EmployeeExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "full_name",
            "position",
            "phone",
            "email",
            "id_document",
            "hire_date",
            "salary",
            "status",
            "notes",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Text(self.full_name.clone()),
            Cell::text(&self.position),
            Cell::text(&self.phone),
            Cell::text(&self.email),
            Cell::text(&self.id_document),
            self.hire_date_value.map_or(Cell::Empty, Cell::Date),
            Cell::number(self.salary),
            Cell::Text(self.status.clone()),
            Cell::text(&self.notes),
        ]
    }
}

// ---------------------------
// Services
// ---------------------------

#[derive(Serialize, Clone, Debug)]
pub struct ServiceExport {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_per_unit: Option<f64>,
    pub unit: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

impl From<Service> for ServiceExport {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            price_per_unit: s.price_per_unit,
            unit: s.unit,
            duration_minutes: s.duration_minutes,
            notes: s.notes,
        }
    }
}

impl ExportRow for ServiceExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "description",
            "price_per_unit",
            "unit",
            "duration_minutes",
            "notes",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Text(self.name.clone()),
            Cell::text(&self.description),
            Cell::number(self.price_per_unit),
            Cell::text(&self.unit),
            Cell::integer(self.duration_minutes),
            Cell::text(&self.notes),
        ]
    }
}

// ---------------------------
// Schedules
// ---------------------------

#[derive(Serialize, Clone, Debug)]
pub struct ScheduleExport {
    pub id: i64,
    pub date: String,
    pub time: Option<String>,
    pub status: String,
    pub client_name: String,
    pub object_name: String,
    pub object_address: String,
    pub service_name: String,
    pub employee_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    #[serde(skip)]
    date_value: NaiveDate,
    #[serde(skip)]
    time_value: Option<NaiveTime>,
}

impl From<ScheduleView> for ScheduleExport {
    fn from(v: ScheduleView) -> Self {
        let s = v.schedule;
        Self {
            id: s.id,
            date: s.date_str(),
            time: s.time_str(),
            status: s.status.to_db_str().to_string(),
            client_name: v.client_name,
            object_name: v.object_name,
            object_address: v.object_address,
            service_name: v.service_name,
            employee_name: v.employee_name,
            duration_minutes: s.duration_minutes,
            cost: s.cost,
            notes: s.notes,
            date_value: s.date,
            time_value: s.time,
        }
    }
}

impl ExportRow for ScheduleExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "date",
            "time",
            "status",
            "client_name",
            "object_name",
            "object_address",
            "service_name",
            "employee_name",
            "duration_minutes",
            "cost",
            "notes",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.id),
            Cell::Date(self.date_value),
            self.time_value.map_or(Cell::Empty, Cell::Time),
            Cell::Text(self.status.clone()),
            Cell::Text(self.client_name.clone()),
            Cell::Text(self.object_name.clone()),
            Cell::Text(self.object_address.clone()),
            Cell::Text(self.service_name.clone()),
            Cell::text(&self.employee_name),
            Cell::integer(self.duration_minutes),
            Cell::number(self.cost),
            Cell::text(&self.notes),
        ]
    }
}

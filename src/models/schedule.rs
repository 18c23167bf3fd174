//! Work orders.

use super::schedule_status::ScheduleStatus;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A persisted work order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub object_id: i64,
    pub service_id: i64,
    pub employee_id: Option<i64>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
    pub status: ScheduleStatus,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

impl Schedule {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> Option<String> {
        self.time.map(|t| t.format("%H:%M").to_string())
    }
}

/// Candidate row supplied by the caller of `ScheduleLogic::save`.
///
/// `explicit_cost` is kept raw: a value that does not parse as a
/// non-negative number is treated as absent and the cost is derived
/// from the catalog instead.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub object_id: i64,
    pub service_id: i64,
    pub employee_id: Option<i64>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
    pub status: ScheduleStatus,
    pub explicit_cost: Option<String>,
    pub notes: Option<String>,
}

impl ScheduleDraft {
    pub fn new(object_id: i64, service_id: i64, date: NaiveDate) -> Self {
        Self {
            object_id,
            service_id,
            employee_id: None,
            date,
            time: None,
            duration_minutes: None,
            status: ScheduleStatus::default(),
            explicit_cost: None,
            notes: None,
        }
    }
}

/// Work order joined with the display names of everything it references.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    pub schedule: Schedule,
    pub object_name: String,
    pub object_address: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub employee_name: Option<String>,
}

/// Optional filters for schedule listings and the schedules report.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub status: Option<ScheduleStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

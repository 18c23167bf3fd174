use serde::{Deserialize, Serialize};

/// Lifecycle of a work order. Reports match on the stored token, so the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 3] = [
        ScheduleStatus::Scheduled,
        ScheduleStatus::Completed,
        ScheduleStatus::Cancelled,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        ScheduleStatus::ALL.into_iter().find(|st| st.to_db_str() == s)
    }

    /// Helper: convert user input (any case, a few short aliases)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "s" | "scheduled" => Some(ScheduleStatus::Scheduled),
            "d" | "done" | "completed" => Some(ScheduleStatus::Completed),
            "c" | "cancelled" | "canceled" => Some(ScheduleStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "Scheduled",
            ScheduleStatus::Completed => "Completed",
            ScheduleStatus::Cancelled => "Cancelled",
        }
    }
}

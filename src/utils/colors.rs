/// ANSI color helper utilities for terminal output.
use crate::models::schedule_status::ScheduleStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Scheduled → yellow, Completed → green, Cancelled → grey.
pub fn color_for_status(status: ScheduleStatus) -> &'static str {
    match status {
        ScheduleStatus::Scheduled => YELLOW,
        ScheduleStatus::Completed => GREEN,
        ScheduleStatus::Cancelled => GREY,
    }
}

//! Formatting utilities used for CLI and export outputs.

use crate::models::schedule_status::ScheduleStatus;
use crate::utils::colors::{RESET, color_for_status};

/// Trim a free-text field; blank input is stored as NULL.
pub fn clean_opt(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `250.00 RUB`, or `--` when there is no amount.
pub fn money(amount: Option<f64>, currency: &str) -> String {
    match amount {
        Some(v) if currency.is_empty() => format!("{v:.2}"),
        Some(v) => format!("{v:.2} {currency}"),
        None => "--".to_string(),
    }
}

pub fn opt_or_dash(value: Option<&str>) -> String {
    value.unwrap_or("--").to_string()
}

/// Colored status label for tables.
pub fn describe_status(status: ScheduleStatus) -> String {
    format!("{}{}{}", color_for_status(status), status.label(), RESET)
}

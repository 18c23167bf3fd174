//! Time utilities: parsing HH:MM for schedule slots.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Slots are stored as `HH:MM`, so seconds are refused rather than dropped.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    match input.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(s) => {
            let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
            Ok(Some(t))
        }
        None => Ok(None),
    }
}

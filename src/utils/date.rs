use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a mandatory `YYYY-MM-DD` argument.
pub fn parse_required_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse an optional date argument; blank input counts as absent.
pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(s) => parse_required_date(s).map(Some),
        None => Ok(None),
    }
}

/// `YYYY-MM` key of the month containing `date`, as matched by `strftime('%Y-%m', ...)`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Days since the Excel epoch (1899-12-30), as stored in a date cell.
pub(crate) fn date_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (date - epoch).num_days() as f64
}

/// Fraction of a day, as stored in a time cell.
pub(crate) fn time_fraction(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_matches_excel() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(date_serial(d), 45726.0);
    }

    #[test]
    fn noon_is_half_a_day() {
        let t = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(time_fraction(t), 0.5);
    }
}

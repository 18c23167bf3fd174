//! Numeric input policy.
//!
//! Direct numeric fields (area, salary, price, duration) are rejected with
//! `InvalidNumeric` when malformed or out of range. Only the explicit cost of a
//! work order degrades to "absent" (see `core::cost::parse_explicit_cost`).

use crate::errors::{AppError, AppResult};

/// Round a currency amount to 2 decimal places.
///
/// Values too large to scale by 100 have no fractional cents left and are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

fn parse_f64(field: &'static str, raw: &str) -> AppResult<f64> {
    let v: f64 = raw.trim().parse().map_err(|_| AppError::InvalidNumeric {
        field,
        value: raw.to_string(),
    })?;
    if !v.is_finite() {
        return Err(AppError::InvalidNumeric {
            field,
            value: raw.to_string(),
        });
    }
    Ok(v)
}

fn blank_to_none(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Optional amount that must be >= 0 (salary, price per unit).
pub fn parse_non_negative(field: &'static str, raw: Option<&String>) -> AppResult<Option<f64>> {
    let Some(s) = blank_to_none(raw) else {
        return Ok(None);
    };
    let v = parse_f64(field, s)?;
    if v < 0.0 {
        return Err(AppError::InvalidNumeric {
            field,
            value: s.to_string(),
        });
    }
    Ok(Some(v))
}

/// Optional area that must be strictly positive.
pub fn parse_area(raw: Option<&String>) -> AppResult<Option<f64>> {
    let Some(s) = blank_to_none(raw) else {
        return Ok(None);
    };
    let v = parse_f64("area", s)?;
    if v <= 0.0 {
        return Err(AppError::InvalidNumeric {
            field: "area",
            value: s.to_string(),
        });
    }
    Ok(Some(v))
}

/// Optional whole number of minutes, >= 0.
pub fn parse_minutes(field: &'static str, raw: Option<&String>) -> AppResult<Option<i64>> {
    let Some(s) = blank_to_none(raw) else {
        return Ok(None);
    };
    match s.parse::<i64>() {
        Ok(v) if v >= 0 => Ok(Some(v)),
        _ => Err(AppError::InvalidNumeric {
            field,
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_huge_amounts_finite() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
    }
}

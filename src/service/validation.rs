//! Field checks shared by the create payloads.

use crate::error::AppError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn invalid(msg: String) -> AppError {
    AppError::Validation(msg)
}

/// Present and not just whitespace.
pub fn required_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", field)));
    }
    Ok(())
}

pub fn min_length(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(invalid(format!("{} must be at least {} characters", field, min)));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("{} must be a non-negative number", field)));
    }
    Ok(())
}

pub fn at_least(field: &str, value: i64, min: i64) -> Result<(), AppError> {
    if value < min {
        return Err(invalid(format!("{} must be at least {}", field, min)));
    }
    Ok(())
}

/// References and path ids are store-assigned positive integers.
pub fn positive_id(field: &str, value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(invalid(format!("{} must be a positive integer", field)));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    check_pattern(&EMAIL, r"^[^@\s]+@[^@\s]+\.[^@\s]+$", field, value, "a valid email address")
}

pub fn phone(field: &str, value: &str) -> Result<(), AppError> {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    check_pattern(&PHONE, r"^\+?[0-9 ()\-]{7,20}$", field, value, "a valid phone number")
}

/// Calendar date as `YYYY-MM-DD`.
pub fn iso_date(field: &str, value: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| invalid(format!("{} must be a date formatted YYYY-MM-DD", field)))
}

fn check_pattern(
    cell: &OnceLock<Option<Regex>>,
    pattern: &str,
    field: &str,
    value: &str,
    what: &str,
) -> Result<(), AppError> {
    let re = cell
        .get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .ok_or_else(|| invalid(format!("invalid pattern for {}", field)))?;
    if !re.is_match(value) {
        return Err(invalid(format!("{} must be {}", field, what)));
    }
    Ok(())
}

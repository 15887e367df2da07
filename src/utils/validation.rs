use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;

use crate::errors::AppError;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid");
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

/// Parses a calendar date in strict `YYYY-MM-DD` form.
pub fn parse_workout_date(raw: &str) -> Result<NaiveDate, AppError> {
    if !DATE_RE.is_match(raw) {
        return Err(AppError::BadRequest("Date must be in YYYY-MM-DD format".to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", raw)))
}

pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    raw.map(parse_workout_date).transpose()
}

//! Field validation for activity input.
//!
//! # Responsibility
//! - Turn raw menu text into typed, normalized field values.
//! - Report a specific error kind for every rejected token.
//!
//! # Invariants
//! - Validators are pure and never touch store state.
//! - Accepted day names are returned in canonical capitalized form.
//! - Accepted times are returned zero-padded as `HH:MM`.

use crate::model::activity::{ActivityId, Weekday};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{1,2})$").expect("valid time regex"));

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejection reason for a single input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidDay(String),
    InvalidTime(String),
    /// Names the field that was blank.
    EmptyField(&'static str),
    InvalidDuration(String),
    InvalidId(String),
    /// Status token other than yes/no.
    InvalidInput(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDay(value) => write!(
                f,
                "invalid day `{value}`; expected one of {}",
                Weekday::ALL.map(Weekday::as_str).join(", ")
            ),
            Self::InvalidTime(value) => {
                write!(f, "invalid time `{value}`; expected 24-hour HH:MM")
            }
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidDuration(value) => write!(
                f,
                "invalid duration `{value}`; expected a non-negative number of hours"
            ),
            Self::InvalidId(value) => write!(f, "invalid id `{value}`; expected a number"),
            Self::InvalidInput(value) => write!(f, "invalid answer `{value}`; expected y or n"),
        }
    }
}

impl Error for ValidationError {}

pub fn validate_day(input: &str) -> ValidationResult<Weekday> {
    Weekday::parse(input).ok_or_else(|| ValidationError::InvalidDay(input.trim().to_string()))
}

/// Parses `H:MM` or `HH:MM` (24-hour) and returns the zero-padded form.
pub fn validate_time(input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidTime(trimmed.to_string());

    let captures = TIME_RE.captures(trimmed).ok_or_else(invalid)?;
    let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minute: u32 = captures[2].parse().map_err(|_| invalid())?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;

    Ok(time.format("%H:%M").to_string())
}

/// Trims `input` and rejects it when nothing is left.
pub fn validate_nonempty_text(field: &'static str, input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub fn validate_duration(input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidDuration(trimmed.to_string())),
    }
}

pub fn validate_id(input: &str) -> ValidationResult<ActivityId> {
    let trimmed = input.trim();
    match trimmed.parse::<ActivityId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId(trimmed.to_string())),
    }
}

/// Maps a yes/no token to the completion flag.
pub fn validate_status(input: &str) -> ValidationResult<bool> {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(ValidationError::InvalidInput(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_is_normalized_to_canonical_name() {
        assert_eq!(validate_day("wednesday"), Ok(Weekday::Wednesday));
        assert_eq!(
            validate_day("Someday"),
            Err(ValidationError::InvalidDay("Someday".to_string()))
        );
    }

    #[test]
    fn time_accepts_single_digit_hour_and_pads_it() {
        assert_eq!(validate_time("9:05").as_deref(), Ok("09:05"));
        assert_eq!(validate_time(" 23:59 ").as_deref(), Ok("23:59"));
        assert_eq!(validate_time("00:00").as_deref(), Ok("00:00"));
    }

    #[test]
    fn time_rejects_out_of_range_and_malformed_values() {
        for input in ["24:00", "12:60", "noon", "12-30", "12:30:00", "", "123:00"] {
            assert!(
                matches!(validate_time(input), Err(ValidationError::InvalidTime(_))),
                "`{input}` should be rejected"
            );
        }
    }

    #[test]
    fn nonempty_text_trims_and_rejects_blank() {
        assert_eq!(validate_nonempty_text("title", "  Gym "), Ok("Gym".to_string()));
        assert_eq!(
            validate_nonempty_text("title", " \t "),
            Err(ValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn duration_rejects_negative_and_non_numeric() {
        assert_eq!(validate_duration("1.5"), Ok(1.5));
        assert_eq!(validate_duration("0"), Ok(0.0));
        for input in ["-1", "abc", "NaN", "inf", ""] {
            assert!(
                matches!(validate_duration(input), Err(ValidationError::InvalidDuration(_))),
                "`{input}` should be rejected"
            );
        }
    }

    #[test]
    fn id_must_be_positive_integer() {
        assert_eq!(validate_id(" 12 "), Ok(12));
        assert!(matches!(validate_id("0"), Err(ValidationError::InvalidId(_))));
        assert!(matches!(validate_id("-3"), Err(ValidationError::InvalidId(_))));
        assert!(matches!(validate_id("one"), Err(ValidationError::InvalidId(_))));
    }

    #[test]
    fn status_accepts_yes_no_tokens() {
        assert_eq!(validate_status("Y"), Ok(true));
        assert_eq!(validate_status("no"), Ok(false));
        assert_eq!(
            validate_status("maybe"),
            Err(ValidationError::InvalidInput("maybe".to_string()))
        );
    }
}

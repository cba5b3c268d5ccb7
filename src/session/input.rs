//! Parsers for single console answers. Each one takes the raw line and
//! either returns a typed value or an `InputError` the session can print
//! before moving on.

use thiserror::Error;

use crate::cost::Currency;
use crate::models::{
    clamp_text, GENDER_MALE, GENDER_OTHER, MAX_AGE_DIGITS, META_CODE_LENGTH, NAME_LENGTH,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("input ended")]
    EndOfInput,
    #[error("input is not valid UTF-8 text")]
    InvalidText,
    #[error("{0:?} is not a whole number")]
    NotANumber(String),
    #[error("{value} is out of range, expected {min} to {max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("{field} cannot be blank")]
    Blank { field: &'static str },
    #[error("{field} may have at most {max} digits")]
    TooManyDigits { field: &'static str, max: usize },
    #[error("please answer y or n")]
    NotYesNo,
}

pub fn parse_int(raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

pub fn parse_in_range(raw: &str, min: i64, max: i64) -> Result<i64, InputError> {
    let value = parse_int(raw)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { value, min, max })
    }
}

/// Surrounding whitespace is dropped and long names are cut to fit the
/// fixed name field.
pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Blank { field: "name" });
    }
    Ok(clamp_text(trimmed, NAME_LENGTH))
}

/// 1 = male, 2 = female, 3 = other.
pub fn parse_gender(raw: &str) -> Result<i32, InputError> {
    let code = parse_in_range(raw, i64::from(GENDER_MALE), i64::from(GENDER_OTHER))?;
    Ok(code as i32)
}

pub fn parse_age(raw: &str) -> Result<u32, InputError> {
    let value = parse_int(raw)?;
    if value < 0 {
        return Err(InputError::OutOfRange {
            value,
            min: 0,
            max: max_age(),
        });
    }
    if value > max_age() {
        return Err(InputError::TooManyDigits {
            field: "age",
            max: MAX_AGE_DIGITS,
        });
    }
    Ok(value as u32)
}

pub fn parse_cost(raw: &str) -> Result<u64, InputError> {
    let value = parse_int(raw)?;
    u64::try_from(value).map_err(|_| InputError::OutOfRange {
        value,
        min: 0,
        max: i64::MAX,
    })
}

/// A metadata code, clamped to its fixed-width block.
pub fn parse_code(raw: &str, field: &'static str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Blank { field });
    }
    Ok(clamp_text(trimmed, META_CODE_LENGTH))
}

pub fn parse_yes_no(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

pub fn parse_currency(raw: &str) -> Result<Currency, InputError> {
    let choice = parse_in_range(raw, 1, 2)?;
    Currency::from_choice(choice).ok_or(InputError::OutOfRange {
        value: choice,
        min: 1,
        max: 2,
    })
}

fn max_age() -> i64 {
    10_i64.pow(MAX_AGE_DIGITS as u32) - 1
}

use crate::constants::ULONG_MAX;
use crate::error::ValueError;

use super::number::parse_number;
use super::sentinel_u64;

/// Parses a percentage such as `10%` or `1,234.5 %`.
///
/// The `%` marker is mandatory. `min` and `max` map to `0` and `u64::MAX`
/// like every other magnitude.
pub fn parse_percent(text: &str) -> Result<f64, ValueError> {
    let text = text.trim();
    if let Some(value) = sentinel_u64(text) {
        return Ok(if value == ULONG_MAX { ULONG_MAX as f64 } else { 0.0 });
    }
    let Some(number) = text.strip_suffix('%') else {
        return Err(ValueError::MissingPercent(text.to_string()));
    };
    Ok(parse_number(number)?.as_f64())
}

/// Parses an access frequency field of a single line scheme, where the
/// `%` marker may be left out: `80` and `80%` both mean eighty percent.
pub fn parse_frequency(text: &str) -> Result<f64, ValueError> {
    let text = text.trim();
    match text.strip_suffix('%') {
        Some(_) => parse_percent(text),
        None => match sentinel_u64(text) {
            Some(value) if value == ULONG_MAX => Ok(ULONG_MAX as f64),
            Some(_) => Ok(0.0),
            None => Ok(parse_number(text)?.as_f64()),
        },
    }
}

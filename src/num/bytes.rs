use crate::constants::SIZE_UNITS;
use crate::error::ValueError;

use super::number::parse_number;
use super::{sentinel_u64, split_number_unit};

/// Parses a byte size such as `2 MiB`, `1,234.5 G`, `123` or `max`.
///
/// Letter and IEC suffixes are the same binary multiplier. Fractional
/// results are truncated and anything beyond `u64::MAX` is clamped to it.
pub fn parse_bytes(text: &str) -> Result<u64, ValueError> {
    let text = text.trim();
    if let Some(value) = sentinel_u64(text) {
        return Ok(value);
    }
    let (number, unit) = split_number_unit(text)?;
    let multiplier = size_multiplier(unit).ok_or_else(|| ValueError::UnknownUnit {
        text: text.to_string(),
        unit: unit.to_string(),
    })?;
    Ok(parse_number(number)?.scale(multiplier))
}

pub(crate) fn size_multiplier(unit: &str) -> Option<u64> {
    if unit.is_empty() || unit == "B" {
        return Some(1);
    }
    SIZE_UNITS
        .iter()
        .find(|(iec, letter, _)| unit == *iec || unit == *letter)
        .map(|(_, _, multiplier)| *multiplier)
}

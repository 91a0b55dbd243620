//! Conversion of operator-written magnitudes into exact values.

pub mod bytes;
pub mod duration;
pub mod number;
pub mod percent;

pub use bytes::parse_bytes;
pub use duration::{parse_duration, parse_ms, parse_ns, parse_us, TimeUnit};
pub use number::{parse_integer, parse_number, Number};
pub use percent::{parse_frequency, parse_percent};

use crate::constants::{MAX_SENTINEL, MIN_SENTINEL, ULONG_MAX};
use crate::error::ValueError;

/// Whether a magnitude holds the `max` sentinel rather than a real bound.
#[inline]
pub fn is_unbounded(value: u64) -> bool {
    value == ULONG_MAX
}

/// Frequency flavour of [`is_unbounded`].
#[inline]
pub fn is_unbounded_f64(value: f64) -> bool {
    value >= ULONG_MAX as f64
}

pub(crate) fn sentinel_u64(text: &str) -> Option<u64> {
    match text {
        MIN_SENTINEL => Some(0),
        MAX_SENTINEL => Some(ULONG_MAX),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == ','
}

/// Splits `text` into its leading number and the trimmed remainder.
pub(crate) fn split_number_unit(text: &str) -> Result<(&str, &str), ValueError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValueError::Empty);
    }
    let end = text
        .find(|ch: char| !is_number_char(ch))
        .unwrap_or(text.len());
    if end == 0 {
        return Err(ValueError::InvalidNumber(text.to_string()));
    }
    let (number, unit) = text.split_at(end);
    Ok((number, unit.trim()))
}

use std::borrow::Cow;
use std::num::IntErrorKind;

use memchr::memchr;

use crate::error::ValueError;

/// A plain number as written by an operator: an integer unless a decimal
/// point is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    /// Multiplies by `factor`, truncating toward zero and clamping at
    /// `u64::MAX`.
    pub fn scale(self, factor: u64) -> u64 {
        match self {
            Number::Int(n) => n.saturating_mul(factor),
            Number::Float(f) => saturating_u64(f * factor as f64),
        }
    }

    /// Same as [`Number::scale`] but in 128 bits, for summing duration terms.
    pub(crate) fn scale_wide(self, factor: u64) -> u128 {
        match self {
            Number::Int(n) => n as u128 * factor as u128,
            Number::Float(f) => {
                let scaled = f * factor as f64;
                if scaled.is_nan() || scaled <= 0.0 {
                    0
                } else {
                    // Saturates at u128::MAX, infinity included.
                    scaled as u128
                }
            }
        }
    }
}

/// Truncates toward zero, mapping anything at or beyond 2^64 to `u64::MAX`.
pub fn saturating_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= u64::MAX as f64 {
        u64::MAX
    } else {
        value as u64
    }
}

/// Parses a plain number, dropping `,` grouping separators wherever they
/// appear.
pub fn parse_number(text: &str) -> Result<Number, ValueError> {
    let stripped = strip_separators(text.trim());
    let digits = stripped.as_ref();
    if digits.is_empty() {
        return Err(ValueError::Empty);
    }
    let invalid = || ValueError::InvalidNumber(text.trim().to_string());

    let mut dots = 0;
    let mut has_digit = false;
    for byte in digits.bytes() {
        match byte {
            b'0'..=b'9' => has_digit = true,
            b'.' => dots += 1,
            _ => return Err(invalid()),
        }
    }
    if !has_digit || dots > 1 {
        return Err(invalid());
    }

    if dots == 1 {
        return digits
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid());
    }
    match digits.parse::<u64>() {
        Ok(n) => Ok(Number::Int(n)),
        // Too many digits for 64 bits; keep the magnitude so callers clamp.
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => digits
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid()),
        Err(_) => Err(invalid()),
    }
}

/// Parses a plain number that must be integral, such as a weight or a
/// watermark threshold.
pub fn parse_integer(text: &str) -> Result<u64, ValueError> {
    match parse_number(text)? {
        Number::Int(n) => Ok(n),
        Number::Float(_) => Err(ValueError::NotAnInteger(text.trim().to_string())),
    }
}

fn strip_separators(text: &str) -> Cow<'_, str> {
    if memchr(b',', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|ch| *ch != ',').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("12", Number::Int(12))]
    #[case("1,234", Number::Int(1234))]
    #[case("1,234,567", Number::Int(1_234_567))]
    #[case("1,2,3,4", Number::Int(1234))]
    #[case("1,234.567", Number::Float(1234.567))]
    #[case(" 42 ", Number::Int(42))]
    #[case("0.5", Number::Float(0.5))]
    fn test_parse_number(#[case] input: &str, #[case] expected: Number) {
        assert_eq!(parse_number(input).unwrap(), expected);
    }

    #[rstest::rstest]
    #[case("")]
    #[case(",")]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("-5")]
    #[case("12 34")]
    #[case(".")]
    fn test_parse_number_rejects(#[case] input: &str) {
        assert!(parse_number(input).is_err());
    }

    #[rstest::rstest]
    fn test_parse_number_beyond_u64_keeps_magnitude() {
        let parsed = parse_number("99,999,999,999,999,999,999").unwrap();
        assert!(matches!(parsed, Number::Float(f) if f > u64::MAX as f64));
        assert_eq!(parsed.scale(1), u64::MAX);
    }

    #[rstest::rstest]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1,000").unwrap(), 1000);
        assert_eq!(
            parse_integer("1.5"),
            Err(ValueError::NotAnInteger("1.5".to_string()))
        );
    }

    #[rstest::rstest]
    fn test_scale_clamps() {
        assert_eq!(Number::Int(u64::MAX).scale(2), u64::MAX);
        assert_eq!(Number::Float(16384.0).scale(1 << 50), u64::MAX);
        assert_eq!(Number::Float(1.9).scale(1), 1);
        assert_eq!(Number::Float(f64::INFINITY).scale_wide(1_000), u128::MAX);
        assert_eq!(Number::Float(f64::NAN).scale_wide(1_000), 0);
    }

    #[rstest::rstest]
    fn test_saturating_u64() {
        assert_eq!(saturating_u64(f64::NAN), 0);
        assert_eq!(saturating_u64(-1.0), 0);
        assert_eq!(saturating_u64(f64::INFINITY), u64::MAX);
        assert_eq!(saturating_u64(123.999), 123);
    }
}

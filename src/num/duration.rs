use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::constants::{
    NSEC_PER_DAY, NSEC_PER_HOUR, NSEC_PER_MINUTE, NSEC_PER_MSEC, NSEC_PER_SEC, NSEC_PER_USEC,
};
use crate::error::ValueError;

use super::number::{parse_number, Number};
use super::{is_number_char, sentinel_u64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Ns,
    Us,
    Ms,
    S,
    M,
    H,
    D,
}

impl TimeUnit {
    /// Every unit, largest first.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::D,
        TimeUnit::H,
        TimeUnit::M,
        TimeUnit::S,
        TimeUnit::Ms,
        TimeUnit::Us,
        TimeUnit::Ns,
    ];

    pub fn nsec(self) -> u64 {
        match self {
            TimeUnit::Ns => 1,
            TimeUnit::Us => NSEC_PER_USEC,
            TimeUnit::Ms => NSEC_PER_MSEC,
            TimeUnit::S => NSEC_PER_SEC,
            TimeUnit::M => NSEC_PER_MINUTE,
            TimeUnit::H => NSEC_PER_HOUR,
            TimeUnit::D => NSEC_PER_DAY,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
            TimeUnit::M => "m",
            TimeUnit::H => "h",
            TimeUnit::D => "d",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == symbol)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::from_symbol(s).ok_or_else(|| ValueError::UnknownUnit {
            text: s.to_string(),
            unit: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct DurationTerm<'a> {
    number: &'a str,
    unit: Option<&'a str>,
}

/// Parses a duration such as `100ms`, `2 h 1 m 2 s` or `max` into `target`
/// units.
///
/// A number without a unit is taken to be in `target` already. Terms are
/// summed in nanoseconds, truncated to `target` and clamped at `u64::MAX`.
pub fn parse_duration(text: &str, target: TimeUnit) -> Result<u64, ValueError> {
    let text = text.trim();
    if let Some(value) = sentinel_u64(text) {
        return Ok(value);
    }
    let terms = split_terms(text)?;
    if terms.is_empty() {
        return Err(ValueError::Empty);
    }

    let mut total_ns: u128 = 0;
    for term in &terms {
        let unit = match term.unit {
            Some(symbol) => TimeUnit::from_symbol(symbol).ok_or_else(|| {
                ValueError::UnknownUnit {
                    text: text.to_string(),
                    unit: symbol.to_string(),
                }
            })?,
            None => target,
        };
        let number: Number = parse_number(term.number)?;
        total_ns = total_ns.saturating_add(number.scale_wide(unit.nsec()));
    }

    let converted = total_ns / target.nsec() as u128;
    Ok(u64::try_from(converted).unwrap_or(u64::MAX))
}

pub fn parse_ns(text: &str) -> Result<u64, ValueError> {
    parse_duration(text, TimeUnit::Ns)
}

pub fn parse_us(text: &str) -> Result<u64, ValueError> {
    parse_duration(text, TimeUnit::Us)
}

pub fn parse_ms(text: &str) -> Result<u64, ValueError> {
    parse_duration(text, TimeUnit::Ms)
}

fn split_terms(text: &str) -> Result<SmallVec<[DurationTerm<'_>; 4]>, ValueError> {
    let mut terms = SmallVec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let number_end = rest
            .find(|ch: char| !is_number_char(ch))
            .unwrap_or(rest.len());
        if number_end == 0 {
            return Err(ValueError::InvalidNumber(text.to_string()));
        }
        let (number, tail) = rest.split_at(number_end);
        let tail = tail.trim_start();
        let unit_end = tail
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        terms.push(DurationTerm {
            number,
            unit: (!unit.is_empty()).then_some(unit),
        });
        rest = tail.trim_start();
    }
    Ok(terms)
}

pub const ULONG_MAX: u64 = u64::MAX;

pub const MIN_SENTINEL: &str = "min";
pub const MAX_SENTINEL: &str = "max";

pub const COMMENT_MARKER: char = '#';

pub const NSEC_PER_USEC: u64 = 1_000;
pub const NSEC_PER_MSEC: u64 = 1_000 * NSEC_PER_USEC;
pub const NSEC_PER_SEC: u64 = 1_000 * NSEC_PER_MSEC;
pub const NSEC_PER_MINUTE: u64 = 60 * NSEC_PER_SEC;
pub const NSEC_PER_HOUR: u64 = 60 * NSEC_PER_MINUTE;
pub const NSEC_PER_DAY: u64 = 24 * NSEC_PER_HOUR;

pub const KIB: u64 = 1 << 10;
pub const MIB: u64 = 1 << 20;
pub const GIB: u64 = 1 << 30;
pub const TIB: u64 = 1 << 40;
pub const PIB: u64 = 1 << 50;
pub const EIB: u64 = 1 << 60;

/// Binary size units, largest first. Each entry lists its IEC and
/// single-letter spellings, which are synonyms.
pub const SIZE_UNITS: &[(&str, &str, u64)] = &[
    ("EiB", "E", EIB),
    ("PiB", "P", PIB),
    ("TiB", "T", TIB),
    ("GiB", "G", GIB),
    ("MiB", "M", MIB),
    ("KiB", "K", KIB),
];

/// Field counts of the five positional single line scheme versions.
pub const SCHEME_LINE_FIELD_COUNTS: &[usize] = &[7, 9, 12, 17, 18];

#[inline]
pub fn is_sentinel(s: &str) -> bool {
    s == MIN_SENTINEL || s == MAX_SENTINEL
}

#[inline]
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

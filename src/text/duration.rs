use crate::constants::NSEC_PER_SEC;
use crate::num::TimeUnit;

use super::number::{write_number_into, write_u64};

/// Renders nanoseconds as every nonzero unit from days down to
/// nanoseconds, e.g. `2 m 3 s 456 ms 789 us 123 ns`.
///
/// The output parses back to the same nanosecond count.
pub fn format_duration_exact(ns: u64, machine_friendly: bool) -> String {
    let mut out = String::new();
    if machine_friendly {
        write_u64(&mut out, ns);
        return out;
    }
    if ns == 0 {
        out.push_str("0 ns");
        return out;
    }

    let mut rest = ns;
    for unit in TimeUnit::ALL {
        let count = rest / unit.nsec();
        if count == 0 {
            continue;
        }
        rest %= unit.nsec();
        if !out.is_empty() {
            out.push(' ');
        }
        write_number_into(count, false, &mut out);
        out.push(' ');
        out.push_str(unit.symbol());
    }
    out
}

/// Renders nanoseconds for reading at a glance: whole hours and minutes,
/// then the last unit with up to three rounded decimals, e.g. `2 m 3.457 s`.
///
/// Days are never used; they fold into hours.
pub fn format_duration_approx(ns: u64, machine_friendly: bool) -> String {
    let mut out = String::new();
    if machine_friendly {
        write_u64(&mut out, ns);
        return out;
    }

    if ns < NSEC_PER_SEC {
        let rounded = round_to_thousandths(ns as u128, sub_second_unit(ns).nsec());
        if rounded < NSEC_PER_SEC as u128 {
            let rounded = rounded as u64;
            write_fraction_into(rounded, sub_second_unit(rounded), &mut out);
            return out;
        }
    }

    // Round before splitting so a carry lands in minutes or hours.
    let mut rest = round_to_thousandths(ns as u128, NSEC_PER_SEC);
    for unit in [TimeUnit::H, TimeUnit::M] {
        let size = unit.nsec() as u128;
        let count = rest / size;
        rest %= size;
        if count == 0 {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        write_u64(&mut out, count as u64);
        out.push(' ');
        out.push_str(unit.symbol());
    }

    if rest == 0 {
        return out;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    write_fraction_into(rest as u64, TimeUnit::S, &mut out);
    out
}

fn sub_second_unit(ns: u64) -> TimeUnit {
    [TimeUnit::Ms, TimeUnit::Us]
        .into_iter()
        .find(|unit| ns >= unit.nsec())
        .unwrap_or(TimeUnit::Ns)
}

/// Rounds half up to a multiple of a thousandth of `unit_size`.
fn round_to_thousandths(value: u128, unit_size: u64) -> u128 {
    let step = (unit_size / 1000).max(1) as u128;
    (value + step / 2) / step * step
}

fn write_fraction_into(value: u64, unit: TimeUnit, out: &mut String) {
    let (whole, thousandths) = rounded_fraction(value, unit.nsec());
    write_u64(out, whole);
    if thousandths != 0 {
        out.push('.');
        out.push_str(&format!("{thousandths:03}"));
    }
    out.push(' ');
    out.push_str(unit.symbol());
}

/// Splits `value` into whole units of `unit_size` and the remainder in
/// rounded thousandths of a unit.
pub(crate) fn rounded_fraction(value: u64, unit_size: u64) -> (u64, u64) {
    let whole = value / unit_size;
    let rem = (value % unit_size) as u128;
    let thousandths = (rem * 1000 + unit_size as u128 / 2) / unit_size as u128;
    if thousandths >= 1000 {
        (whole + 1, 0)
    } else {
        (whole, thousandths as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NSEC_PER_DAY, NSEC_PER_HOUR, NSEC_PER_MINUTE, NSEC_PER_MSEC};

    const SEC: u64 = NSEC_PER_SEC;

    #[rstest::rstest]
    #[case(123, "123 ns", "123 ns")]
    #[case(123456, "123 us 456 ns", "123.456 us")]
    #[case(123000, "123 us", "123 us")]
    #[case(123456789, "123 ms 456 us 789 ns", "123.457 ms")]
    #[case(123000000, "123 ms", "123 ms")]
    #[case(123456789123, "2 m 3 s 456 ms 789 us 123 ns", "2 m 3.457 s")]
    #[case(123000000000, "2 m 3 s", "2 m 3 s")]
    #[case(NSEC_PER_MINUTE, "1 m", "1 m")]
    #[case(NSEC_PER_MINUTE + 59 * SEC, "1 m 59 s", "1 m 59 s")]
    #[case(
        NSEC_PER_MINUTE + 59 * SEC + 123 * NSEC_PER_MSEC,
        "1 m 59 s 123 ms",
        "1 m 59.123 s"
    )]
    #[case(
        2 * NSEC_PER_HOUR + NSEC_PER_MINUTE + 59 * SEC + 123 * NSEC_PER_MSEC,
        "2 h 1 m 59 s 123 ms",
        "2 h 1 m 59.123 s"
    )]
    #[case(2 * NSEC_PER_HOUR, "2 h", "2 h")]
    #[case(
        3 * NSEC_PER_DAY + 2 * NSEC_PER_HOUR + NSEC_PER_MINUTE + 59 * SEC + 123 * NSEC_PER_MSEC,
        "3 d 2 h 1 m 59 s 123 ms",
        "74 h 1 m 59.123 s"
    )]
    #[case(3 * NSEC_PER_DAY + 2 * NSEC_PER_HOUR, "3 d 2 h", "74 h")]
    #[case(1234 * NSEC_PER_DAY + 2 * NSEC_PER_HOUR, "1,234 d 2 h", "29618 h")]
    #[case(999_999_999, "999 ms 999 us 999 ns", "1 s")]
    #[case(999_999, "999 us 999 ns", "999.999 us")]
    #[case(
        3_599_999_900_000,
        "59 m 59 s 999 ms 900 us",
        "1 h"
    )]
    #[case(
        NSEC_PER_HOUR + 59 * NSEC_PER_MINUTE + 59 * SEC + 999_600_000,
        "1 h 59 m 59 s 999 ms 600 us",
        "2 h"
    )]
    fn test_format_duration(#[case] ns: u64, #[case] exact: &str, #[case] approx: &str) {
        assert_eq!(format_duration_exact(ns, false), exact);
        assert_eq!(format_duration_approx(ns, false), approx);
    }

    #[rstest::rstest]
    fn test_format_zero() {
        assert_eq!(format_duration_exact(0, false), "0 ns");
        assert_eq!(format_duration_approx(0, false), "0 ns");
    }

    #[rstest::rstest]
    fn test_format_machine_friendly() {
        assert_eq!(format_duration_exact(123456789, true), "123456789");
        assert_eq!(format_duration_approx(123456789, true), "123456789");
    }

    #[rstest::rstest]
    fn test_approx_drops_negligible_seconds() {
        assert_eq!(format_duration_approx(NSEC_PER_MINUTE + 100, false), "1 m");
        assert_eq!(
            format_duration_approx(NSEC_PER_HOUR + 5 * SEC, false),
            "1 h 5 s"
        );
    }

    #[rstest::rstest]
    fn test_approx_of_largest_value() {
        let text = format_duration_approx(u64::MAX, false);
        assert!(text.starts_with("5124095 h 34 m 33.71"), "{text}");
    }

    #[rstest::rstest]
    fn test_round_to_thousandths() {
        assert_eq!(round_to_thousandths(999_999_999, NSEC_PER_MSEC * 1000), 1_000_000_000);
        assert_eq!(round_to_thousandths(999_499_999, NSEC_PER_MSEC * 1000), 999_000_000);
        assert_eq!(round_to_thousandths(123, 1), 123);
    }

    #[rstest::rstest]
    fn test_rounded_fraction_carries() {
        assert_eq!(rounded_fraction(1_999_999, NSEC_PER_MSEC), (2, 0));
        assert_eq!(rounded_fraction(1_500, 1_000), (1, 500));
    }
}

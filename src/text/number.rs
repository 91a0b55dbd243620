use itoa::Buffer as ItoaBuffer;

/// Renders `n` with `,` between every three digits, or bare digits when
/// `machine_friendly` is set.
pub fn format_number(n: u64, machine_friendly: bool) -> String {
    let mut out = String::new();
    write_number_into(n, machine_friendly, &mut out);
    out
}

pub(crate) fn write_number_into(n: u64, machine_friendly: bool, out: &mut String) {
    let mut buf = ItoaBuffer::new();
    let digits = buf.format(n);
    if machine_friendly {
        out.push_str(digits);
        return;
    }

    let lead = match digits.len() % 3 {
        0 => 3,
        rem => rem,
    };
    out.push_str(&digits[..lead]);
    let mut idx = lead;
    while idx < digits.len() {
        out.push(',');
        out.push_str(&digits[idx..idx + 3]);
        idx += 3;
    }
}

pub(crate) fn write_u64(out: &mut String, value: u64) {
    write_number_into(value, true, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::parse_number;
    use crate::num::Number;

    #[rstest::rstest]
    #[case(0, "0")]
    #[case(123, "123")]
    #[case(1234, "1,234")]
    #[case(123456, "123,456")]
    #[case(1234567, "1,234,567")]
    #[case(u64::MAX, "18,446,744,073,709,551,615")]
    fn test_format_number(#[case] input: u64, #[case] expected: &str) {
        assert_eq!(format_number(input, false), expected);
    }

    #[rstest::rstest]
    fn test_format_number_machine_friendly() {
        assert_eq!(format_number(1234567, true), "1234567");
    }

    #[rstest::rstest]
    #[case(0)]
    #[case(999)]
    #[case(1000)]
    #[case(987_654_321)]
    #[case(u64::MAX)]
    fn test_format_then_parse(#[case] n: u64) {
        assert_eq!(parse_number(&format_number(n, false)).unwrap(), Number::Int(n));
    }
}

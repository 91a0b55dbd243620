use ryu::Buffer as RyuBuffer;

use crate::constants::{MAX_SENTINEL, ULONG_MAX};
use crate::num::{is_unbounded, is_unbounded_f64, TimeUnit};
use crate::text::number::write_u64;
use crate::EncodeOptions;

/// Builds single line scheme text one whitespace-separated field at a time.
pub(crate) struct LineWriter {
    buffer: String,
    sentinels: bool,
    fields: usize,
}

impl LineWriter {
    pub fn new(options: &EncodeOptions) -> Self {
        Self {
            buffer: String::new(),
            sentinels: options.sentinels,
            fields: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn field_count(&self) -> usize {
        self.fields
    }

    fn begin_field(&mut self) {
        if self.fields > 0 {
            self.buffer.push(' ');
        }
        self.fields += 1;
    }

    pub fn write_word(&mut self, word: &str) {
        self.begin_field();
        self.buffer.push_str(word);
    }

    pub fn write_integer(&mut self, value: u64) {
        self.begin_field();
        write_u64(&mut self.buffer, value);
    }

    pub fn write_bytes(&mut self, value: u64) {
        self.begin_field();
        if self.sentinels && is_unbounded(value) {
            self.buffer.push_str(MAX_SENTINEL);
            return;
        }
        write_u64(&mut self.buffer, value);
    }

    /// Writes a duration with its unit attached, e.g. `100us`.
    pub fn write_duration(&mut self, value: u64, unit: TimeUnit) {
        self.begin_field();
        if self.sentinels && is_unbounded(value) {
            self.buffer.push_str(MAX_SENTINEL);
            return;
        }
        write_u64(&mut self.buffer, value);
        self.buffer.push_str(unit.symbol());
    }

    pub fn write_percent(&mut self, value: f64) {
        self.begin_field();
        if self.sentinels && is_unbounded_f64(value) {
            self.buffer.push_str(MAX_SENTINEL);
            return;
        }
        write_f64_into(value, &mut self.buffer);
        self.buffer.push('%');
    }
}

/// Writes a non-negative float without an exponent, integral values
/// without a fraction.
pub(crate) fn write_f64_into(f: f64, out: &mut String) {
    if !f.is_finite() || f <= 0.0 {
        out.push('0');
        return;
    }
    if f.fract() == 0.0 {
        if f < ULONG_MAX as f64 {
            write_u64(out, f as u64);
        } else {
            out.push_str(&format!("{f:.0}"));
        }
        return;
    }

    let mut buf = RyuBuffer::new();
    let formatted = buf.format(f);
    if formatted.contains('e') || formatted.contains('E') {
        // High precision to avoid exponent, then trim trailing zeros
        let expanded = format!("{f:.17}");
        push_trimmed_decimal(&expanded, out);
    } else {
        push_trimmed_decimal(formatted, out);
    }
}

fn push_trimmed_decimal(s: &str, out: &mut String) {
    if let Some((int_part, frac_part)) = s.split_once('.') {
        let trimmed = frac_part.trim_end_matches('0');
        out.push_str(int_part);
        if !trimmed.is_empty() {
            out.push('.');
            out.push_str(trimmed);
        }
    } else {
        out.push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::parse_percent;

    fn format_f64(f: f64) -> String {
        let mut out = String::new();
        write_f64_into(f, &mut out);
        out
    }

    #[rstest::rstest]
    #[case(0.0, "0")]
    #[case(80.0, "80")]
    #[case(12.34, "12.34")]
    #[case(0.000001, "0.000001")]
    #[case(1e21, "1000000000000000000000")]
    fn test_write_f64(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_f64(input), expected);
    }

    #[rstest::rstest]
    fn test_unbounded_percent_without_sentinels_parses_back() {
        let mut writer = LineWriter::new(&EncodeOptions::new().with_sentinels(false));
        writer.write_percent(u64::MAX as f64);
        let text = writer.finish();
        assert_eq!(parse_percent(&text).unwrap(), u64::MAX as f64);
    }

    #[rstest::rstest]
    fn test_line_writer_fields() {
        let mut writer = LineWriter::new(&EncodeOptions::default());
        writer.write_bytes(4096);
        writer.write_bytes(u64::MAX);
        writer.write_percent(12.5);
        writer.write_duration(100_000, TimeUnit::Us);
        writer.write_duration(u64::MAX, TimeUnit::Us);
        writer.write_word("cold");
        writer.write_integer(7);
        assert_eq!(writer.field_count(), 7);
        assert_eq!(writer.finish(), "4096 max 12.5% 100000us max cold 7");
    }
}

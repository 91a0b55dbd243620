pub(crate) mod writer;

use std::io::Write;

use serde::Serialize;

use crate::constants::SCHEME_LINE_FIELD_COUNTS;
use crate::num::TimeUnit;
use crate::types::{AgeUnit, NrAccessesUnit, Scheme};
use crate::{EncodeOptions, Error, Indent, Result};

use writer::LineWriter;

/// Renders a scheme as an 18-field single line, the only layout that holds
/// every quota field.
///
/// Fails for schemes the line grammar cannot express: non-percent access
/// frequencies, non-microsecond ages, filters, and action or metric names
/// that are empty or contain whitespace.
pub fn to_line(scheme: &Scheme, options: &EncodeOptions) -> Result<String> {
    check_line_representable(scheme)?;

    let pattern = &scheme.access_pattern;
    let quotas = &scheme.quotas;
    let watermarks = &scheme.watermarks;
    let mut writer = LineWriter::new(options);

    writer.write_bytes(pattern.min_sz_bytes);
    writer.write_bytes(pattern.max_sz_bytes);
    writer.write_percent(pattern.min_nr_accesses);
    writer.write_percent(pattern.max_nr_accesses);
    writer.write_duration(pattern.min_age, TimeUnit::Us);
    writer.write_duration(pattern.max_age, TimeUnit::Us);
    writer.write_word(scheme.action.as_str());

    writer.write_duration(quotas.time_ms, TimeUnit::Ms);
    writer.write_bytes(quotas.sz_bytes);
    writer.write_duration(quotas.reset_interval_ms, TimeUnit::Ms);
    writer.write_integer(quotas.weight_sz_permil);
    writer.write_integer(quotas.weight_nr_accesses_permil);
    writer.write_integer(quotas.weight_age_permil);

    writer.write_word(watermarks.metric.as_str());
    writer.write_duration(watermarks.interval_us, TimeUnit::Us);
    writer.write_integer(watermarks.high_permil);
    writer.write_integer(watermarks.mid_permil);
    writer.write_integer(watermarks.low_permil);

    debug_assert_eq!(writer.field_count(), SCHEME_LINE_FIELD_COUNTS[4]);
    Ok(writer.finish())
}

/// Renders schemes one per line.
pub fn to_lines(schemes: &[Scheme], options: &EncodeOptions) -> Result<String> {
    let lines = schemes
        .iter()
        .map(|scheme| to_line(scheme, options))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Renders schemes as a JSON array in the key/value layout the JSON grammar
/// reads back.
pub fn to_json(schemes: &[Scheme], options: &EncodeOptions) -> Result<String> {
    let mut out = Vec::new();
    to_json_writer(&mut out, schemes, options)?;
    String::from_utf8(out).map_err(|err| Error::encode(format!("invalid utf-8: {err}")))
}

pub fn to_json_writer<W: Write>(writer: W, schemes: &[Scheme], options: &EncodeOptions) -> Result<()> {
    let Indent::Spaces(indent) = options.indent;
    let result = if indent == 0 {
        serde_json::to_writer(writer, schemes)
    } else {
        let indent_bytes = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        schemes.serialize(&mut serializer)
    };
    result.map_err(|err| Error::encode(format!("JSON write failed: {err}")))
}

fn check_line_representable(scheme: &Scheme) -> Result<()> {
    let pattern = &scheme.access_pattern;
    if pattern.nr_accesses_unit != NrAccessesUnit::Percent {
        return Err(Error::encode(format!(
            "scheme {}: single line schemes need nr_accesses in percent",
            scheme.name
        )));
    }
    if pattern.age_unit != AgeUnit::Usec {
        return Err(Error::encode(format!(
            "scheme {}: single line schemes need ages in microseconds",
            scheme.name
        )));
    }
    if !scheme.filters.is_empty() {
        return Err(Error::encode(format!(
            "scheme {}: single line schemes cannot hold filters",
            scheme.name
        )));
    }
    for word in [scheme.action.as_str(), scheme.watermarks.metric.as_str()] {
        if word.is_empty() || word.contains(char::is_whitespace) {
            return Err(Error::encode(format!(
                "scheme {}: '{word}' is not a single line field",
                scheme.name
            )));
        }
    }
    Ok(())
}

use smallvec::SmallVec;
use tracing::debug;

use crate::constants::SCHEME_LINE_FIELD_COUNTS;
use crate::error::ValueError;
use crate::num::{parse_bytes, parse_frequency, parse_integer, parse_ms, parse_us};
use crate::types::{
    AccessPattern, AgeUnit, DamosAction, NrAccessesUnit, Quotas, Scheme, WatermarkMetric,
    Watermarks,
};
use crate::{Error, Result};

/// The positional single line scheme layouts, told apart only by how many
/// fields a line has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeLineVersion {
    /// Access pattern and action.
    V0,
    /// V0 plus a size quota and its reset interval.
    V1,
    /// V1 plus quota prioritization weights.
    V2,
    /// V2 plus watermarks.
    V3,
    /// Access pattern, action, full quotas including a time budget, and
    /// watermarks. Positions after the action differ from V3.
    V4,
}

impl SchemeLineVersion {
    pub const ALL: [SchemeLineVersion; 5] = [
        SchemeLineVersion::V0,
        SchemeLineVersion::V1,
        SchemeLineVersion::V2,
        SchemeLineVersion::V3,
        SchemeLineVersion::V4,
    ];

    pub fn from_field_count(count: usize) -> Option<Self> {
        match count {
            7 => Some(SchemeLineVersion::V0),
            9 => Some(SchemeLineVersion::V1),
            12 => Some(SchemeLineVersion::V2),
            17 => Some(SchemeLineVersion::V3),
            18 => Some(SchemeLineVersion::V4),
            _ => None,
        }
    }

    pub fn field_count(self) -> usize {
        match self {
            SchemeLineVersion::V0 => 7,
            SchemeLineVersion::V1 => 9,
            SchemeLineVersion::V2 => 12,
            SchemeLineVersion::V3 => 17,
            SchemeLineVersion::V4 => 18,
        }
    }
}

/// A field that failed to convert, with its position in the line.
#[derive(Debug)]
struct FieldError {
    index: usize,
    source: ValueError,
}

struct Fields<'a> {
    fields: &'a [&'a str],
}

impl<'a> Fields<'a> {
    fn get(&self, index: usize) -> &'a str {
        self.fields[index]
    }

    fn convert<T>(
        &self,
        index: usize,
        parse: impl FnOnce(&str) -> std::result::Result<T, ValueError>,
    ) -> std::result::Result<T, FieldError> {
        parse(self.fields[index]).map_err(|source| FieldError { index, source })
    }

    fn bytes(&self, index: usize) -> std::result::Result<u64, FieldError> {
        self.convert(index, parse_bytes)
    }

    fn percent(&self, index: usize) -> std::result::Result<f64, FieldError> {
        self.convert(index, parse_frequency)
    }

    fn us(&self, index: usize) -> std::result::Result<u64, FieldError> {
        self.convert(index, parse_us)
    }

    fn ms(&self, index: usize) -> std::result::Result<u64, FieldError> {
        self.convert(index, parse_ms)
    }

    fn integer(&self, index: usize) -> std::result::Result<u64, FieldError> {
        self.convert(index, parse_integer)
    }
}

/// Decodes one single line scheme, naming the result `name`.
///
/// Bad field counts fail with [`ErrorKind::SchemaMismatch`]; a field that
/// does not convert fails with [`ErrorKind::MalformedValue`] and the generic
/// message `wrong input field`, the failing position kept in the error's
/// location.
///
/// [`ErrorKind::SchemaMismatch`]: crate::ErrorKind::SchemaMismatch
/// [`ErrorKind::MalformedValue`]: crate::ErrorKind::MalformedValue
pub fn decode_line(line: &str, name: &str) -> Result<Scheme> {
    let fields: SmallVec<[&str; 18]> = line.split_whitespace().collect();
    let Some(version) = SchemeLineVersion::from_field_count(fields.len()) else {
        return Err(Error::schema_mismatch(format!(
            "expected {SCHEME_LINE_FIELD_COUNTS:?} fields, but '{line}'"
        )));
    };

    let fields = Fields { fields: &fields };
    decode_fields(&fields, version, name).map_err(|err| {
        debug!(
            field = err.index,
            value = fields.get(err.index),
            cause = %err.source,
            "scheme field conversion failed"
        );
        Error::malformed_value("wrong input field").with_field(err.index)
    })
}

fn decode_fields(
    f: &Fields<'_>,
    version: SchemeLineVersion,
    name: &str,
) -> std::result::Result<Scheme, FieldError> {
    let mut scheme = Scheme::named(name);
    scheme.access_pattern = AccessPattern {
        min_sz_bytes: f.bytes(0)?,
        max_sz_bytes: f.bytes(1)?,
        min_nr_accesses: f.percent(2)?,
        max_nr_accesses: f.percent(3)?,
        nr_accesses_unit: NrAccessesUnit::Percent,
        min_age: f.us(4)?,
        max_age: f.us(5)?,
        age_unit: AgeUnit::Usec,
    };
    scheme.action = DamosAction::from_name(f.get(6));

    match version {
        SchemeLineVersion::V0 => {}
        SchemeLineVersion::V1 => {
            scheme.quotas = Quotas {
                sz_bytes: f.bytes(7)?,
                reset_interval_ms: f.ms(8)?,
                ..Quotas::default()
            };
        }
        SchemeLineVersion::V2 => {
            scheme.quotas = Quotas {
                sz_bytes: f.bytes(7)?,
                reset_interval_ms: f.ms(8)?,
                weight_sz_permil: f.integer(9)?,
                weight_nr_accesses_permil: f.integer(10)?,
                weight_age_permil: f.integer(11)?,
                ..Quotas::default()
            };
        }
        SchemeLineVersion::V3 => {
            scheme.quotas = Quotas {
                sz_bytes: f.bytes(7)?,
                reset_interval_ms: f.ms(8)?,
                weight_sz_permil: f.integer(9)?,
                weight_nr_accesses_permil: f.integer(10)?,
                weight_age_permil: f.integer(11)?,
                ..Quotas::default()
            };
            scheme.watermarks = Watermarks {
                metric: WatermarkMetric::from_name(f.get(12)),
                interval_us: f.us(13)?,
                high_permil: f.integer(14)?,
                mid_permil: f.integer(15)?,
                low_permil: f.integer(16)?,
            };
        }
        SchemeLineVersion::V4 => {
            scheme.quotas = Quotas {
                time_ms: f.ms(7)?,
                sz_bytes: f.bytes(8)?,
                reset_interval_ms: f.ms(9)?,
                weight_sz_permil: f.integer(10)?,
                weight_nr_accesses_permil: f.integer(11)?,
                weight_age_permil: f.integer(12)?,
            };
            scheme.watermarks = Watermarks {
                metric: WatermarkMetric::from_name(f.get(13)),
                interval_us: f.us(14)?,
                high_permil: f.integer(15)?,
                mid_permil: f.integer(16)?,
                low_permil: f.integer(17)?,
            };
        }
    }
    Ok(scheme)
}

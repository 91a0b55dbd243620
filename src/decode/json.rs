use serde::Deserialize;
use serde_json::Value;

use crate::constants::ULONG_MAX;
use crate::error::ValueError;
use crate::num::number::saturating_u64;
use crate::num::{parse_bytes, parse_duration, parse_integer, parse_number, parse_percent, TimeUnit};
use crate::types::{
    AccessPattern, AgeUnit, DamosAction, NrAccessesUnit, Quotas, Scheme, WatermarkMetric,
    Watermarks,
};
use crate::{Error, Result};

/// A magnitude as it may appear in JSON: a bare number already in the
/// field's unit, or text for the value parser.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Magnitude {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Magnitude {
    fn float(f: f64) -> std::result::Result<f64, ValueError> {
        if f.is_finite() && f >= 0.0 {
            Ok(f)
        } else {
            Err(ValueError::InvalidNumber(f.to_string()))
        }
    }

    fn bytes(&self) -> std::result::Result<u64, ValueError> {
        match self {
            Magnitude::Int(n) => Ok(*n),
            Magnitude::Float(f) => Self::float(*f).map(saturating_u64),
            Magnitude::Text(text) => parse_bytes(text),
        }
    }

    fn duration(&self, target: TimeUnit) -> std::result::Result<u64, ValueError> {
        match self {
            Magnitude::Int(n) => Ok(*n),
            Magnitude::Float(f) => Self::float(*f).map(saturating_u64),
            Magnitude::Text(text) => parse_duration(text, target),
        }
    }

    fn nr_accesses(&self, unit: NrAccessesUnit) -> std::result::Result<f64, ValueError> {
        match (self, unit) {
            (Magnitude::Int(n), _) => Ok(*n as f64),
            (Magnitude::Float(f), _) => Self::float(*f),
            (Magnitude::Text(text), NrAccessesUnit::Percent) => parse_percent(text),
            (Magnitude::Text(text), NrAccessesUnit::SampleIntervals) => match text.trim() {
                "min" => Ok(0.0),
                "max" => Ok(ULONG_MAX as f64),
                other => parse_number(other).map(|number| number.as_f64()),
            },
        }
    }

    fn age(&self, unit: AgeUnit) -> std::result::Result<u64, ValueError> {
        match (self, unit) {
            (Magnitude::Text(text), AgeUnit::AggrIntervals) => match text.trim() {
                "min" => Ok(0),
                "max" => Ok(ULONG_MAX),
                other => parse_integer(other),
            },
            _ => self.duration(TimeUnit::Us),
        }
    }

    fn integer(&self) -> std::result::Result<u64, ValueError> {
        match self {
            Magnitude::Int(n) => Ok(*n),
            Magnitude::Float(f) => {
                let f = Self::float(*f)?;
                if f.fract() != 0.0 {
                    return Err(ValueError::NotAnInteger(f.to_string()));
                }
                Ok(saturating_u64(f))
            }
            Magnitude::Text(text) => parse_integer(text),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SchemeKvPairs {
    name: Option<String>,
    action: Option<String>,
    access_pattern: Option<AccessPatternKvPairs>,
    quotas: Option<QuotasKvPairs>,
    watermarks: Option<WatermarksKvPairs>,
    filters: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AccessPatternKvPairs {
    min_sz_bytes: Option<Magnitude>,
    max_sz_bytes: Option<Magnitude>,
    min_nr_accesses: Option<Magnitude>,
    max_nr_accesses: Option<Magnitude>,
    nr_accesses_unit: Option<NrAccessesUnit>,
    min_age: Option<Magnitude>,
    max_age: Option<Magnitude>,
    age_unit: Option<AgeUnit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct QuotasKvPairs {
    time_ms: Option<Magnitude>,
    sz_bytes: Option<Magnitude>,
    reset_interval_ms: Option<Magnitude>,
    weight_sz_permil: Option<Magnitude>,
    weight_nr_accesses_permil: Option<Magnitude>,
    weight_age_permil: Option<Magnitude>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WatermarksKvPairs {
    metric: Option<String>,
    interval_us: Option<Magnitude>,
    high_permil: Option<Magnitude>,
    mid_permil: Option<Magnitude>,
    low_permil: Option<Magnitude>,
}

/// Converts an optional magnitude, keeping `default` when the key is absent
/// and naming the key on failure.
fn field<T>(
    key: &str,
    value: Option<&Magnitude>,
    default: T,
    convert: impl FnOnce(&Magnitude) -> std::result::Result<T, ValueError>,
) -> Result<T> {
    match value {
        None => Ok(default),
        Some(magnitude) => {
            convert(magnitude).map_err(|err| Error::invalid_json(format!("{key}: {err}")))
        }
    }
}

impl AccessPatternKvPairs {
    fn into_access_pattern(self) -> Result<AccessPattern> {
        let defaults = AccessPattern::default();
        let nr_accesses_unit = self.nr_accesses_unit.unwrap_or_default();
        let age_unit = self.age_unit.unwrap_or_default();
        Ok(AccessPattern {
            min_sz_bytes: field(
                "min_sz_bytes",
                self.min_sz_bytes.as_ref(),
                defaults.min_sz_bytes,
                Magnitude::bytes,
            )?,
            max_sz_bytes: field(
                "max_sz_bytes",
                self.max_sz_bytes.as_ref(),
                defaults.max_sz_bytes,
                Magnitude::bytes,
            )?,
            min_nr_accesses: field(
                "min_nr_accesses",
                self.min_nr_accesses.as_ref(),
                defaults.min_nr_accesses,
                |m| m.nr_accesses(nr_accesses_unit),
            )?,
            max_nr_accesses: field(
                "max_nr_accesses",
                self.max_nr_accesses.as_ref(),
                defaults.max_nr_accesses,
                |m| m.nr_accesses(nr_accesses_unit),
            )?,
            nr_accesses_unit,
            min_age: field("min_age", self.min_age.as_ref(), defaults.min_age, |m| {
                m.age(age_unit)
            })?,
            max_age: field("max_age", self.max_age.as_ref(), defaults.max_age, |m| {
                m.age(age_unit)
            })?,
            age_unit,
        })
    }
}

impl QuotasKvPairs {
    fn into_quotas(self) -> Result<Quotas> {
        Ok(Quotas {
            time_ms: field("time_ms", self.time_ms.as_ref(), 0, |m| {
                m.duration(TimeUnit::Ms)
            })?,
            sz_bytes: field("sz_bytes", self.sz_bytes.as_ref(), 0, Magnitude::bytes)?,
            reset_interval_ms: field(
                "reset_interval_ms",
                self.reset_interval_ms.as_ref(),
                0,
                |m| m.duration(TimeUnit::Ms),
            )?,
            weight_sz_permil: field(
                "weight_sz_permil",
                self.weight_sz_permil.as_ref(),
                0,
                Magnitude::integer,
            )?,
            weight_nr_accesses_permil: field(
                "weight_nr_accesses_permil",
                self.weight_nr_accesses_permil.as_ref(),
                0,
                Magnitude::integer,
            )?,
            weight_age_permil: field(
                "weight_age_permil",
                self.weight_age_permil.as_ref(),
                0,
                Magnitude::integer,
            )?,
        })
    }
}

impl WatermarksKvPairs {
    fn into_watermarks(self) -> Result<Watermarks> {
        Ok(Watermarks {
            metric: self
                .metric
                .as_deref()
                .map(WatermarkMetric::from_name)
                .unwrap_or_default(),
            interval_us: field("interval_us", self.interval_us.as_ref(), 0, |m| {
                m.duration(TimeUnit::Us)
            })?,
            high_permil: field(
                "high_permil",
                self.high_permil.as_ref(),
                0,
                Magnitude::integer,
            )?,
            mid_permil: field("mid_permil", self.mid_permil.as_ref(), 0, Magnitude::integer)?,
            low_permil: field("low_permil", self.low_permil.as_ref(), 0, Magnitude::integer)?,
        })
    }
}

impl SchemeKvPairs {
    fn into_scheme(self, index: usize) -> Result<Scheme> {
        Ok(Scheme {
            name: self.name.unwrap_or_else(|| index.to_string()),
            action: self
                .action
                .as_deref()
                .map(DamosAction::from_name)
                .unwrap_or_default(),
            access_pattern: self
                .access_pattern
                .map(AccessPatternKvPairs::into_access_pattern)
                .transpose()?
                .unwrap_or_default(),
            quotas: self
                .quotas
                .map(QuotasKvPairs::into_quotas)
                .transpose()?
                .unwrap_or_default(),
            watermarks: self
                .watermarks
                .map(WatermarksKvPairs::into_watermarks)
                .transpose()?
                .unwrap_or_default(),
            filters: self.filters,
        })
    }
}

/// Converts one JSON object with scheme keys into a [`Scheme`]. Objects
/// without a `name` are named after `index`.
pub fn scheme_from_kvpairs(value: Value, index: usize) -> Result<Scheme> {
    let kvpairs = SchemeKvPairs::deserialize(value)
        .map_err(|err| Error::invalid_json(format!("scheme {index}: {err}")))?;
    kvpairs.into_scheme(index).map_err(|err| Error {
        message: format!("scheme {index}: {}", err.message),
        ..err
    })
}

/// Converts a parsed JSON document, which must be an array of scheme
/// objects.
pub fn schemes_from_value(value: Value) -> Result<Vec<Scheme>> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_json(format!(
            "expected a JSON array of schemes, found {}",
            json_type_name(&value)
        )));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| scheme_from_kvpairs(item, index))
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_full_object() {
        let value = json!({
            "name": "hot",
            "action": "WillNeed",
            "access_pattern": {
                "min_sz_bytes": "2 MiB",
                "max_sz_bytes": "max",
                "min_nr_accesses": "80 %",
                "max_nr_accesses": "100 %",
                "min_age": "100ms",
                "max_age": "max"
            },
            "quotas": {
                "time_ms": "10ms",
                "sz_bytes": "1 GiB",
                "reset_interval_ms": "1 s",
                "weight_sz_permil": 0,
                "weight_nr_accesses_permil": "1,000",
                "weight_age_permil": 1
            },
            "watermarks": {
                "metric": "free_mem_rate",
                "interval_us": "5 s",
                "high_permil": 500,
                "mid_permil": 400,
                "low_permil": 300
            },
            "filters": [{"filter_type": "anon", "matching": true}]
        });
        let scheme = scheme_from_kvpairs(value, 0).unwrap();
        assert_eq!(scheme.name, "hot");
        assert_eq!(scheme.action, DamosAction::Willneed);
        assert_eq!(scheme.access_pattern.min_sz_bytes, 2 << 20);
        assert_eq!(scheme.access_pattern.min_nr_accesses, 80.0);
        assert_eq!(scheme.access_pattern.min_age, 100_000);
        assert_eq!(scheme.quotas.time_ms, 10);
        assert_eq!(scheme.quotas.sz_bytes, 1 << 30);
        assert_eq!(scheme.quotas.reset_interval_ms, 1000);
        assert_eq!(scheme.quotas.weight_nr_accesses_permil, 1000);
        assert_eq!(scheme.watermarks.metric, WatermarkMetric::FreeMemRate);
        assert_eq!(scheme.watermarks.interval_us, 5_000_000);
        assert_eq!(scheme.filters.len(), 1);
    }

    #[rstest::rstest]
    fn test_missing_keys_use_defaults() {
        let scheme = scheme_from_kvpairs(json!({"action": "cold"}), 4).unwrap();
        assert_eq!(scheme.name, "4");
        assert_eq!(scheme.action, DamosAction::Cold);
        assert_eq!(scheme.access_pattern, AccessPattern::default());
        assert_eq!(scheme.quotas, Quotas::default());
        assert_eq!(scheme.watermarks, Watermarks::default());
    }

    #[rstest::rstest]
    fn test_sample_interval_units() {
        let value = json!({
            "access_pattern": {
                "min_nr_accesses": "5",
                "max_nr_accesses": "max",
                "nr_accesses_unit": "sample_intervals",
                "min_age": "3",
                "max_age": 10,
                "age_unit": "aggr_intervals"
            }
        });
        let pattern = scheme_from_kvpairs(value, 0).unwrap().access_pattern;
        assert_eq!(pattern.nr_accesses_unit, NrAccessesUnit::SampleIntervals);
        assert_eq!(pattern.min_nr_accesses, 5.0);
        assert_eq!(pattern.max_nr_accesses, u64::MAX as f64);
        assert_eq!(pattern.age_unit, AgeUnit::AggrIntervals);
        assert_eq!(pattern.min_age, 3);
        assert_eq!(pattern.max_age, 10);
    }

    #[rstest::rstest]
    #[case(json!({"actoin": "stat"}))]
    #[case(json!({"quotas": {"sz_bytes": "2 XB"}}))]
    #[case(json!({"quotas": {"weight_sz_permil": 1.5}}))]
    #[case(json!({"access_pattern": {"min_nr_accesses": "10"}}))]
    #[case(json!({"watermarks": {"high_permil": -1}}))]
    #[case(json!("stat"))]
    fn test_rejects(#[case] value: Value) {
        let err = scheme_from_kvpairs(value, 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert!(err.message.starts_with("scheme 2: "), "{}", err.message);
    }

    #[rstest::rstest]
    fn test_document_must_be_array() {
        let err = schemes_from_value(json!({"action": "stat"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidJson);
        assert_eq!(
            err.message,
            "expected a JSON array of schemes, found an object"
        );
    }
}

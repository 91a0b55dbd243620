use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::ULONG_MAX;
use crate::num::{is_unbounded, is_unbounded_f64};

use super::action::{DamosAction, WatermarkMetric};

/// Unit of `min_nr_accesses`/`max_nr_accesses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NrAccessesUnit {
    #[default]
    Percent,
    SampleIntervals,
}

/// Unit of `min_age`/`max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    #[default]
    Usec,
    AggrIntervals,
}

/// Size, access frequency and age a region must have for a scheme to act on
/// it. Ranges are inclusive and not checked for `min <= max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPattern {
    pub min_sz_bytes: u64,
    pub max_sz_bytes: u64,
    pub min_nr_accesses: f64,
    pub max_nr_accesses: f64,
    pub nr_accesses_unit: NrAccessesUnit,
    pub min_age: u64,
    pub max_age: u64,
    pub age_unit: AgeUnit,
}

impl AccessPattern {
    pub fn has_unbounded_size(&self) -> bool {
        is_unbounded(self.max_sz_bytes)
    }

    pub fn has_unbounded_nr_accesses(&self) -> bool {
        is_unbounded_f64(self.max_nr_accesses)
    }

    pub fn has_unbounded_age(&self) -> bool {
        is_unbounded(self.max_age)
    }
}

impl Default for AccessPattern {
    fn default() -> Self {
        Self {
            min_sz_bytes: 0,
            max_sz_bytes: ULONG_MAX,
            min_nr_accesses: 0.0,
            max_nr_accesses: 100.0,
            nr_accesses_unit: NrAccessesUnit::Percent,
            min_age: 0,
            max_age: ULONG_MAX,
            age_unit: AgeUnit::Usec,
        }
    }
}

/// Budget bounding how much of a scheme's action runs per reset window.
/// Zero means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Quotas {
    pub time_ms: u64,
    pub sz_bytes: u64,
    pub reset_interval_ms: u64,
    pub weight_sz_permil: u64,
    pub weight_nr_accesses_permil: u64,
    pub weight_age_permil: u64,
}

/// Metric thresholds deciding whether a scheme is active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Watermarks {
    pub metric: WatermarkMetric,
    pub interval_us: u64,
    pub high_permil: u64,
    pub mid_permil: u64,
    pub low_permil: u64,
}

/// One memory management policy: a region condition, an action and the
/// limits under which the action runs.
///
/// `filters` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scheme {
    pub name: String,
    pub action: DamosAction,
    pub access_pattern: AccessPattern,
    pub quotas: Quotas,
    pub watermarks: Watermarks,
    pub filters: Vec<Value>,
}

impl Scheme {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

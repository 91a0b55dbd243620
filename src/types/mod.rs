pub mod action;
pub mod scheme;

pub use action::{DamosAction, WatermarkMetric};
pub use scheme::{AccessPattern, AgeUnit, NrAccessesUnit, Quotas, Scheme, Watermarks};

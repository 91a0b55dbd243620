use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

/// What a scheme does to the regions it matches.
///
/// Names are case-insensitive and stored lowercase. Names outside the known
/// set are kept verbatim (lowercased) as [`DamosAction::Other`].
///
/// # Examples
/// ```
/// use damos::DamosAction;
///
/// assert_eq!("PageOut".parse::<DamosAction>().unwrap(), DamosAction::Pageout);
/// assert_eq!(DamosAction::from_name("MIGRATE_HOT").as_str(), "migrate_hot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DamosAction {
    Willneed,
    Cold,
    Pageout,
    Hugepage,
    Nohugepage,
    LruPrio,
    LruDeprio,
    #[default]
    Stat,
    Other(SmolStr),
}

impl DamosAction {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "willneed" => DamosAction::Willneed,
            "cold" => DamosAction::Cold,
            "pageout" => DamosAction::Pageout,
            "hugepage" => DamosAction::Hugepage,
            "nohugepage" => DamosAction::Nohugepage,
            "lru_prio" => DamosAction::LruPrio,
            "lru_deprio" => DamosAction::LruDeprio,
            "stat" => DamosAction::Stat,
            _ => DamosAction::Other(SmolStr::from(lower)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DamosAction::Willneed => "willneed",
            DamosAction::Cold => "cold",
            DamosAction::Pageout => "pageout",
            DamosAction::Hugepage => "hugepage",
            DamosAction::Nohugepage => "nohugepage",
            DamosAction::LruPrio => "lru_prio",
            DamosAction::LruDeprio => "lru_deprio",
            DamosAction::Stat => "stat",
            DamosAction::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for DamosAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamosAction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DamosAction::from_name(s))
    }
}

impl Serialize for DamosAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DamosAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(DamosAction::from_name(&name))
    }
}

/// System metric a scheme's watermarks are compared against.
///
/// # Examples
/// ```
/// use damos::WatermarkMetric;
///
/// assert_eq!(WatermarkMetric::from_name("NONE"), WatermarkMetric::None);
/// assert_eq!(WatermarkMetric::FreeMemRate.as_str(), "free_mem_rate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WatermarkMetric {
    #[default]
    None,
    FreeMemRate,
    Other(SmolStr),
}

impl WatermarkMetric {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "none" => WatermarkMetric::None,
            "free_mem_rate" => WatermarkMetric::FreeMemRate,
            _ => WatermarkMetric::Other(SmolStr::from(lower)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WatermarkMetric::None => "none",
            WatermarkMetric::FreeMemRate => "free_mem_rate",
            WatermarkMetric::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for WatermarkMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatermarkMetric {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WatermarkMetric::from_name(s))
    }
}

impl Serialize for WatermarkMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WatermarkMetric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(WatermarkMetric::from_name(&name))
    }
}

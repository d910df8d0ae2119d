//! Part catalog entry types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::node::SlotType;

/// The kind of slot a part occupies once installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    Case,
    Motherboard,
    Cpu,
    Gpu,
    Ram,
    Psu,
}

impl InstallType {
    /// Slot types this part type may be installed into.
    ///
    /// `None` means the type carries no slot constraint (the case mounts
    /// freely) and passes slot validation unconditionally.
    pub fn accepted_slots(&self) -> Option<&'static [SlotType]> {
        match self {
            InstallType::Case => None,
            InstallType::Motherboard => Some(&[SlotType::MotherboardMount]),
            InstallType::Cpu => Some(&[SlotType::CpuSocket]),
            InstallType::Gpu => Some(&[SlotType::PcieX16]),
            InstallType::Ram => Some(&[SlotType::RamSlot]),
            InstallType::Psu => Some(&[SlotType::PsuMount]),
        }
    }

    /// Whether at most one part of this type may be installed at a time.
    /// RAM is the only multi-instance type.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, InstallType::Ram)
    }

    pub fn all() -> &'static [InstallType] {
        &[
            InstallType::Case,
            InstallType::Motherboard,
            InstallType::Cpu,
            InstallType::Gpu,
            InstallType::Ram,
            InstallType::Psu,
        ]
    }
}

impl std::fmt::Display for InstallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallType::Case => write!(f, "case"),
            InstallType::Motherboard => write!(f, "motherboard"),
            InstallType::Cpu => write!(f, "cpu"),
            InstallType::Gpu => write!(f, "gpu"),
            InstallType::Ram => write!(f, "ram"),
            InstallType::Psu => write!(f, "psu"),
        }
    }
}

impl std::str::FromStr for InstallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "case" => Ok(InstallType::Case),
            "motherboard" => Ok(InstallType::Motherboard),
            "cpu" => Ok(InstallType::Cpu),
            "gpu" => Ok(InstallType::Gpu),
            "ram" => Ok(InstallType::Ram),
            "psu" => Ok(InstallType::Psu),
            _ => Err(format!("Unknown install type: {}", s)),
        }
    }
}

/// A single specification attribute value
///
/// Catalog sources mix numeric and string attributes in one bag (socket
/// names next to wattage figures), so the value type is a closed union
/// normalized at the catalog boundary. Engine code only ever goes through
/// the typed accessors on [`SpecMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Text(String),
}

impl SpecValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => Some(*n),
            SpecValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => Some(s),
            SpecValue::Number(_) => None,
        }
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        SpecValue::Number(n)
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::Text(s.to_string())
    }
}

/// Specification attribute bag, keyed by attribute name
///
/// Well-known keys: `socket`, `wattage`, `max_wattage`, `performance_score`,
/// `workstation_weight`, `gaming_weight`, `slot_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecMap(pub BTreeMap<String, SpecValue>);

impl SpecMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric attribute, or `None` when absent or non-numeric.
    pub fn num(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(SpecValue::as_number)
    }

    /// Numeric attribute with a 0.0 fallback, the aggregation default.
    pub fn num_or_zero(&self, key: &str) -> f64 {
        self.num(key).unwrap_or(0.0)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(SpecValue::as_text)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<SpecValue>) {
        self.0.insert(key.to_string(), value.into());
    }
}

/// A mounting point a part exposes once installed (e.g. the sockets and
/// slots a motherboard offers). Position is a layout hint for front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountPoint {
    pub id: String,

    pub slot: SlotType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub position: Vec<f64>,

    /// Socket designation for CPU-socket mount points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_type: Option<String>,
}

/// A catalog part. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Catalog-unique identifier (e.g. "cpu_001")
    pub id: String,

    /// Display name
    pub name: String,

    /// What kind of slot this part installs into
    #[serde(rename = "type")]
    pub install_type: InstallType,

    /// Display grouping (e.g. "Processors")
    pub category: String,

    /// Specification attributes
    #[serde(default)]
    pub specs: SpecMap,

    /// Estimated price in whole currency units
    pub price_estimate: f64,

    /// Mount points this part exposes when installed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mount_nodes: Vec<MountPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Part {
    /// Socket designation, when the part declares one
    pub fn socket(&self) -> Option<&str> {
        self.specs.text("socket")
    }

    /// Power draw in watts; parts without a wattage spec draw nothing
    pub fn wattage(&self) -> f64 {
        self.specs.num_or_zero("wattage")
    }
}

//! Persisted build documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::BuildId;
use crate::model::install::{InstalledPart, PartPlacement};
use crate::model::stats::SystemStats;

/// A saved build: a snapshot of which parts occupy which nodes plus the
/// summary totals at save time.
///
/// Only placement triples are persisted; loading a build rejoins each
/// `part_id` against the live catalog to reconstruct full part details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,

    pub name: String,

    pub author: String,

    pub created_at: DateTime<Utc>,

    pub total_cost: i64,

    pub total_wattage: i64,

    pub parts: Vec<PartPlacement>,
}

impl Build {
    /// Snapshot the given session parts and stats under a name
    pub fn from_parts(name: &str, author: &str, parts: &[InstalledPart], stats: &SystemStats) -> Self {
        Self {
            id: BuildId::new(),
            name: name.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
            total_cost: stats.total_cost,
            total_wattage: stats.total_wattage,
            parts: parts.iter().map(InstalledPart::placement).collect(),
        }
    }
}

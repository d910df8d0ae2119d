//! Installed parts and their persisted placement records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::part::{InstallType, Part};

/// A part placed into the current build session.
///
/// Owned exclusively by the session; never shared between builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledPart {
    /// The full catalog part
    pub part: Part,

    /// Mount node this part occupies; absent when the part was installed
    /// without a target node (the case mounts freely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    /// When the part was installed into the session
    pub installed_at: DateTime<Utc>,
}

impl InstalledPart {
    pub fn id(&self) -> &str {
        &self.part.id
    }

    pub fn install_type(&self) -> InstallType {
        self.part.install_type
    }

    /// Collapse to the summary triple persisted in session and build
    /// documents. Full specs are never duplicated into documents.
    pub fn placement(&self) -> PartPlacement {
        PartPlacement {
            part_id: self.part.id.clone(),
            node_id: self.node_id.clone(),
            installed_at: self.installed_at,
        }
    }
}

/// The `(partId, nodeId, installedAt)` triple stored in session files and
/// saved build documents. Rejoined against the live catalog on load;
/// placements whose part id no longer resolves are silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartPlacement {
    pub part_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    pub installed_at: DateTime<Utc>,
}

/// Find the first installed part of a given type
pub fn find_by_type(parts: &[InstalledPart], install_type: InstallType) -> Option<&InstalledPart> {
    parts.iter().find(|p| p.install_type() == install_type)
}

/// Count installed parts of a given type
pub fn count_by_type(parts: &[InstalledPart], install_type: InstallType) -> usize {
    parts.iter().filter(|p| p.install_type() == install_type).count()
}

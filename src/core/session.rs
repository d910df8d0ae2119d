//! Build session - the single owner of the in-progress build
//!
//! The session holds the installed-part list, the last computed stats,
//! pending notices, and the currently selected mount node. Every mutation
//! delegates to [`crate::core::engine`] and stores the engine's result;
//! the session itself contains no validation logic.
//!
//! Sessions persist as `.rig/session.json` so successive CLI invocations
//! operate on one ongoing build. Only placement triples go to disk; parts
//! rejoin against the live catalog on load and stats are always recomputed,
//! never trusted from a file.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::catalog::Catalog;
use crate::core::engine::{self, InstallOutcome};
use crate::model::install::{find_by_type, InstalledPart, PartPlacement};
use crate::model::node::MountNode;
use crate::model::notice::{Notice, NoticeKind, Severity};
use crate::model::part::Part;
use crate::model::stats::SystemStats;

/// The current build session
#[derive(Debug, Default)]
pub struct Session {
    parts: Vec<InstalledPart>,
    stats: SystemStats,
    notices: Vec<Notice>,
    selected_node: Option<String>,
}

/// What `Session::install` did
#[derive(Debug, PartialEq)]
pub enum InstallResult {
    /// Part added; any advisory notices were appended to the session
    Installed { advisories: Vec<Notice> },
    /// Part not added; the rejection was appended to the session
    Rejected(Notice),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from previously installed parts
    pub fn from_parts(parts: Vec<InstalledPart>) -> Self {
        let stats = engine::compute_stats(&parts);
        Self {
            parts,
            stats,
            notices: Vec::new(),
            selected_node: None,
        }
    }

    pub fn parts(&self) -> &[InstalledPart] {
        &self.parts
    }

    pub fn stats(&self) -> &SystemStats {
        &self.stats
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    /// Currently open mount nodes, derived fresh from the installed parts
    pub fn open_nodes(&self) -> Vec<MountNode> {
        engine::open_mount_nodes(&self.parts)
    }

    /// Install a part into an explicit node, the selected node, or the
    /// first open node accepting the part's slot type, in that order of
    /// preference.
    ///
    /// A rejection replaces the pending notices (only the latest rejection
    /// is ever surfaced) and leaves the selected node for the next attempt;
    /// a success clears both and keeps only fresh advisories.
    pub fn install(&mut self, part: &Part, explicit_node: Option<MountNode>) -> InstallResult {
        let target = match explicit_node.or_else(|| self.selected_target()) {
            Some(node) => Some(node),
            None => match self.default_target(part) {
                Ok(node) => node,
                Err(notice) => {
                    self.notices = vec![notice.clone()];
                    return InstallResult::Rejected(notice);
                }
            },
        };

        match engine::try_install(&self.parts, part, target.as_ref(), Utc::now()) {
            InstallOutcome::Installed {
                parts,
                stats,
                advisories,
            } => {
                self.parts = parts;
                self.stats = stats;
                self.notices = advisories.clone();
                self.selected_node = None;
                InstallResult::Installed { advisories }
            }
            InstallOutcome::Rejected(notice) => {
                self.notices = vec![notice.clone()];
                InstallResult::Rejected(notice)
            }
        }
    }

    /// The selected node, resolved against the currently open set. A stale
    /// selection resolves to nothing.
    fn selected_target(&self) -> Option<MountNode> {
        let selected = self.selected_node.as_deref()?;
        self.open_nodes().into_iter().find(|n| n.id == selected)
    }

    /// Default placement for a part installed with no explicit or selected
    /// node: the first open node accepting the part's slot type, so a node
    /// never holds two parts. Unconstrained types mount freely. When every
    /// accepting node is occupied the install is rejected here, except that
    /// an already-installed exclusive part falls through to the engine so
    /// the duplicate rejection surfaces instead.
    fn default_target(&self, part: &Part) -> Result<Option<MountNode>, Notice> {
        let accepted = match part.install_type.accepted_slots() {
            Some(accepted) => accepted,
            None => return Ok(None),
        };

        if let Some(node) = self
            .open_nodes()
            .into_iter()
            .find(|n| accepted.contains(&n.slot))
        {
            return Ok(Some(node));
        }

        if part.install_type.is_exclusive()
            && find_by_type(&self.parts, part.install_type).is_some()
        {
            return Ok(None);
        }

        Err(Notice::new(
            NoticeKind::SlotMismatch,
            Severity::Error,
            format!("No open mount node accepts {}", part.name),
        ))
    }

    /// Remove a part by id. Removal is a clean slate: pending notices are
    /// cleared whether or not the id matched anything.
    pub fn remove(&mut self, part_id: &str) {
        let (parts, stats) = engine::remove(&self.parts, part_id);
        self.parts = parts;
        self.stats = stats;
        self.notices.clear();
    }

    /// Select a mount node for the next install; `None` clears the selection
    pub fn select_node(&mut self, node_id: Option<String>) {
        self.selected_node = node_id;
    }

    /// Append a boundary-layer notice (catalog/store failures)
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    /// Drop everything and return to an empty build
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the session contents with a loaded build's parts
    pub fn replace_parts(&mut self, parts: Vec<InstalledPart>) {
        *self = Self::from_parts(parts);
    }

    // --- persistence ---

    /// Load the session file, rejoining placements against the catalog.
    ///
    /// A missing file is an empty session. Placements whose part id no
    /// longer resolves are dropped silently, matching build-load tolerance.
    pub fn load(path: &Path, catalog: &Catalog) -> Result<Self, SessionError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| SessionError::ReadFailed(e.to_string()))?;
        let file: SessionFile =
            serde_json::from_str(&content).map_err(|e| SessionError::ReadFailed(e.to_string()))?;

        let parts: Vec<InstalledPart> = file
            .parts
            .iter()
            .filter_map(|placement| {
                catalog.get(&placement.part_id).map(|part| InstalledPart {
                    part: part.clone(),
                    node_id: placement.node_id.clone(),
                    installed_at: placement.installed_at,
                })
            })
            .collect();

        let stats = engine::compute_stats(&parts);
        Ok(Self {
            parts,
            stats,
            notices: file.notices,
            selected_node: file.selected_node,
        })
    }

    /// Persist placements, notices, and node selection
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::WriteFailed(e.to_string()))?;
        }

        let file = SessionFile {
            parts: self.parts.iter().map(InstalledPart::placement).collect(),
            notices: self.notices.clone(),
            selected_node: self.selected_node.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| SessionError::WriteFailed(e.to_string()))?;
        fs::write(path, json).map_err(|e| SessionError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

/// On-disk session shape: placements only, no part specs, no stats
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    parts: Vec<PartPlacement>,

    #[serde(default)]
    notices: Vec<Notice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_node: Option<String>,
}

/// Errors from session persistence
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session: {0}")]
    ReadFailed(String),

    #[error("failed to write session: {0}")]
    WriteFailed(String),
}

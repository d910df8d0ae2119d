//! Build validation & scoring engine
//!
//! Pure functions over the installed-part list: admissibility of an
//! install, aggregate statistics, and the open mount-node set. No I/O,
//! no shared state; every failure is returned as a [`Notice`] value and
//! the caller's list is never modified in place.

use chrono::{DateTime, Utc};

use crate::model::install::{count_by_type, find_by_type, InstalledPart};
use crate::model::node::{MountNode, SlotType};
use crate::model::notice::{Notice, NoticeKind, Severity};
use crate::model::part::{InstallType, Part};
use crate::model::stats::SystemStats;

/// Result of [`try_install`]
#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// The part was added. `advisories` carries at most a power-overload
    /// notice; an overload flags the build but does not undo the install.
    Installed {
        parts: Vec<InstalledPart>,
        stats: SystemStats,
        advisories: Vec<Notice>,
    },
    /// The part was not added and the build is unchanged.
    Rejected(Notice),
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}

/// Validate and apply a part installation.
///
/// Checks run in order and short-circuit on the first failure:
///
/// 1. slot compatibility against `target` (skipped when no target node is
///    given; types without a slot constraint always pass)
/// 2. CPU socket against an already-installed motherboard
/// 3. single-instance constraint for exclusive part types
///
/// The duplicate rejection carries severity `warning` yet still blocks,
/// while the overload advisory carries `critical` yet does not; that
/// inversion is intentional, long-standing behavior (see DESIGN.md).
pub fn try_install(
    current: &[InstalledPart],
    candidate: &Part,
    target: Option<&MountNode>,
    now: DateTime<Utc>,
) -> InstallOutcome {
    if let Some(node) = target {
        if let Some(accepted) = candidate.install_type.accepted_slots() {
            if !accepted.contains(&node.slot) {
                return InstallOutcome::Rejected(Notice::new(
                    NoticeKind::SlotMismatch,
                    Severity::Error,
                    format!("{} cannot be installed in {}", candidate.name, node.slot),
                ));
            }
        }
    }

    if candidate.install_type == InstallType::Cpu {
        if let Some(motherboard) = find_by_type(current, InstallType::Motherboard) {
            let board_socket = motherboard.part.socket();
            let cpu_socket = candidate.socket();
            if board_socket != cpu_socket {
                return InstallOutcome::Rejected(Notice::new(
                    NoticeKind::SocketMismatch,
                    Severity::Error,
                    format!(
                        "Incompatible socket: {} vs {}",
                        cpu_socket.unwrap_or("none"),
                        board_socket.unwrap_or("none"),
                    ),
                ));
            }
        }
    }

    if candidate.install_type.is_exclusive()
        && find_by_type(current, candidate.install_type).is_some()
    {
        return InstallOutcome::Rejected(Notice::new(
            NoticeKind::DuplicateCategory,
            Severity::Warning,
            format!("Remove existing {} first", candidate.install_type),
        ));
    }

    let mut parts = current.to_vec();
    parts.push(InstalledPart {
        part: candidate.clone(),
        node_id: target.map(|n| n.id.clone()),
        installed_at: now,
    });

    let stats = compute_stats(&parts);

    // Post-hoc PSU check: an overload is advisory, the install stands.
    let mut advisories = Vec::new();
    if let Some(psu) = find_by_type(&parts, InstallType::Psu) {
        let max_wattage = psu.part.specs.num_or_zero("max_wattage");
        if stats.total_wattage as f64 > max_wattage {
            advisories.push(Notice::new(
                NoticeKind::PowerOverload,
                Severity::Critical,
                format!(
                    "Power overload: {}W draw exceeds {}W PSU capacity",
                    stats.total_wattage, max_wattage as i64,
                ),
            ));
        }
    }

    InstallOutcome::Installed {
        parts,
        stats,
        advisories,
    }
}

/// Remove a part by id and recompute stats.
///
/// An absent id is a no-op, not an error. Callers treat removal as a clean
/// slate and clear any pending notices.
pub fn remove(current: &[InstalledPart], part_id: &str) -> (Vec<InstalledPart>, SystemStats) {
    let parts: Vec<InstalledPart> = current
        .iter()
        .filter(|p| p.id() != part_id)
        .cloned()
        .collect();
    let stats = compute_stats(&parts);
    (parts, stats)
}

/// Recompute aggregate statistics over the full installed-part list.
///
/// Missing spec attributes contribute 0. All figures round to the nearest
/// integer.
pub fn compute_stats(parts: &[InstalledPart]) -> SystemStats {
    let mut total_cost = 0.0;
    let mut total_wattage = 0.0;
    let mut workstation_score = 0.0;
    let mut gaming_score = 0.0;

    for installed in parts {
        let part = &installed.part;
        total_cost += part.price_estimate;
        total_wattage += part.wattage();

        let base = part.specs.num_or_zero("performance_score");
        workstation_score += base * part.specs.num_or_zero("workstation_weight");
        gaming_score += base * part.specs.num_or_zero("gaming_weight");
    }

    SystemStats {
        total_cost: total_cost.round() as i64,
        total_wattage: total_wattage.round() as i64,
        workstation_score: workstation_score.round() as i64,
        gaming_score: gaming_score.round() as i64,
        power_efficiency: power_efficiency(parts, total_wattage).round() as i64,
    }
}

/// PSU headroom rating: 100 up to 80% utilization, falling off linearly
/// to 60 at 100%, and 0 past capacity. No PSU (or a nonsensical rating)
/// reads as 100. Clamped at 0 from below.
fn power_efficiency(parts: &[InstalledPart], total_wattage: f64) -> f64 {
    let max_wattage = match find_by_type(parts, InstallType::Psu) {
        Some(psu) => psu.part.specs.num_or_zero("max_wattage"),
        None => return 100.0,
    };
    if max_wattage <= 0.0 {
        return 100.0;
    }

    let utilization = total_wattage / max_wattage * 100.0;
    if utilization > 100.0 {
        0.0
    } else if utilization > 80.0 {
        (100.0 - (utilization - 80.0) * 2.0).max(0.0)
    } else {
        100.0
    }
}

/// Derive the mount nodes currently open for installation.
///
/// Deterministic and side-effect free; recomputed on every state change,
/// never cached. The motherboard mount exists only while no motherboard is
/// installed; its sockets and slots appear once it is. Both free DIMM
/// slots are offered at once. The PSU bay is independent of the board.
pub fn open_mount_nodes(parts: &[InstalledPart]) -> Vec<MountNode> {
    let mut nodes = Vec::new();

    let motherboard = find_by_type(parts, InstallType::Motherboard);
    if motherboard.is_none() {
        nodes.push(MountNode::new(
            "motherboard_slot",
            SlotType::MotherboardMount,
            "Install Motherboard",
        ));
    }

    if let Some(board) = motherboard {
        if find_by_type(parts, InstallType::Cpu).is_none() {
            let mut node = MountNode::new("cpu_socket", SlotType::CpuSocket, "CPU Socket");
            node.socket = board.part.socket().map(str::to_string);
            nodes.push(node);
        }
        if find_by_type(parts, InstallType::Gpu).is_none() {
            nodes.push(MountNode::new("pcie_slot_1", SlotType::PcieX16, "PCIe x16"));
        }

        let ram_count = count_by_type(parts, InstallType::Ram);
        if ram_count < 2 {
            let occupied: Vec<&str> = parts
                .iter()
                .filter(|p| p.install_type() == InstallType::Ram)
                .filter_map(|p| p.node_id.as_deref())
                .collect();
            let mut free: Vec<MountNode> = ["ram_slot_1", "ram_slot_2"]
                .iter()
                .filter(|id| !occupied.contains(*id))
                .map(|id| MountNode::new(id, SlotType::RamSlot, "DIMM Slot"))
                .collect();
            free.truncate(2 - ram_count);
            nodes.extend(free);
        }
    }

    if find_by_type(parts, InstallType::Psu).is_none() {
        nodes.push(MountNode::new("psu_slot", SlotType::PsuMount, "PSU Bay"));
    }

    nodes
}

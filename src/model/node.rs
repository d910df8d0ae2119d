//! Mount nodes - the named installation points offered by the current build

use serde::{Deserialize, Serialize};

use crate::model::part::InstallType;

/// Slot type accepted by a mount node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    CpuSocket,
    PcieX16,
    RamSlot,
    MotherboardMount,
    PsuMount,
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotType::CpuSocket => write!(f, "CPU_SOCKET"),
            SlotType::PcieX16 => write!(f, "PCIE_X16"),
            SlotType::RamSlot => write!(f, "RAM_SLOT"),
            SlotType::MotherboardMount => write!(f, "MOTHERBOARD_MOUNT"),
            SlotType::PsuMount => write!(f, "PSU_MOUNT"),
        }
    }
}

/// A named installation point derived from the current build state.
///
/// Nodes are never stored: the open set is recomputed from the installed
/// part list on every change (see [`crate::core::engine::open_mount_nodes`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountNode {
    /// Unique within the current build (e.g. "cpu_socket", "ram_slot_2")
    pub id: String,

    /// Slot type this node accepts
    pub slot: SlotType,

    /// Human label for display
    pub label: String,

    /// Socket designation carried for display on CPU-socket nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
}

impl MountNode {
    pub fn new(id: &str, slot: SlotType, label: &str) -> Self {
        Self {
            id: id.to_string(),
            slot,
            label: label.to_string(),
            socket: None,
        }
    }

    /// The canonical mount node for a part type. Install targets resolve
    /// against the open-node set, so this names the node each type lands
    /// on when its slot is free. The case has no node (it mounts freely,
    /// outside any node).
    pub fn default_for(install_type: InstallType) -> Option<MountNode> {
        match install_type {
            InstallType::Motherboard => Some(MountNode::new(
                "motherboard_slot",
                SlotType::MotherboardMount,
                "Install Motherboard",
            )),
            InstallType::Cpu => {
                Some(MountNode::new("cpu_socket", SlotType::CpuSocket, "CPU Socket"))
            }
            InstallType::Gpu => {
                Some(MountNode::new("pcie_slot_1", SlotType::PcieX16, "PCIe x16"))
            }
            InstallType::Ram => {
                Some(MountNode::new("ram_slot_1", SlotType::RamSlot, "DIMM Slot"))
            }
            InstallType::Psu => {
                Some(MountNode::new("psu_slot", SlotType::PsuMount, "PSU Bay"))
            }
            InstallType::Case => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_type_wire_format() {
        let json = serde_json::to_string(&SlotType::CpuSocket).unwrap();
        assert_eq!(json, "\"CPU_SOCKET\"");
        let parsed: SlotType = serde_json::from_str("\"PCIE_X16\"").unwrap();
        assert_eq!(parsed, SlotType::PcieX16);
    }

    #[test]
    fn test_default_node_per_type() {
        let node = MountNode::default_for(InstallType::Gpu).unwrap();
        assert_eq!(node.id, "pcie_slot_1");
        assert_eq!(node.slot, SlotType::PcieX16);
        assert!(MountNode::default_for(InstallType::Case).is_none());
    }
}

//! Data model - catalog parts, mount nodes, installed parts, builds

pub mod build;
pub mod install;
pub mod node;
pub mod notice;
pub mod part;
pub mod stats;

pub use build::Build;
pub use install::{InstalledPart, PartPlacement};
pub use node::{MountNode, SlotType};
pub use notice::{Notice, NoticeKind, Severity};
pub use part::{InstallType, MountPoint, Part, SpecMap, SpecValue};
pub use stats::SystemStats;

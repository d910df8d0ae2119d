//! Core module - workspace, catalog, engine, session, and build store

pub mod catalog;
pub mod config;
pub mod engine;
pub mod identity;
pub mod project;
pub mod session;
pub mod store;

pub use catalog::Catalog;
pub use config::Config;
pub use engine::InstallOutcome;
pub use identity::{BuildId, IdParseError};
pub use project::{Workspace, WorkspaceError};
pub use session::{InstallResult, Session, SessionError};
pub use store::{BuildStore, FsBuildStore, StoreError};

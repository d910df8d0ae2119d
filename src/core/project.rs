//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::Catalog;

/// Represents a rig workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .rig/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            let rig_dir = current.join(".rig");
            if rig_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let rig_dir = root.join(".rig");
        if rig_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        Self::create_structure(&root)
    }

    /// Force initialization even if .rig/ exists
    pub fn init_force(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::create_structure(&root)
    }

    fn create_structure(root: &Path) -> Result<Self, WorkspaceError> {
        let rig_dir = root.join(".rig");
        std::fs::create_dir_all(&rig_dir).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let config_path = rig_dir.join("config.yaml");
        if !config_path.exists() {
            std::fs::write(&config_path, Self::default_config())
                .map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        }

        std::fs::create_dir_all(root.join("builds"))
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Catalog::write_seed(&root.join("catalog"))
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn default_config() -> &'static str {
        r#"# Rig workspace configuration

# Default author for saved builds (falls back to git config / $USER)
# author: ""

# Default output format (auto, tsv, json, csv, id)
# default_format: auto
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .rig configuration directory
    pub fn rig_dir(&self) -> PathBuf {
        self.root.join(".rig")
    }

    /// Directory holding part catalog documents
    pub fn catalog_dir(&self) -> PathBuf {
        self.root.join("catalog")
    }

    /// Directory holding saved build documents
    pub fn builds_dir(&self) -> PathBuf {
        self.root.join("builds")
    }

    /// Path of the persisted session file
    pub fn session_path(&self) -> PathBuf {
        self.rig_dir().join("session.json")
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a rig workspace (searched from {searched_from:?}). Run 'rig init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("rig workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();

        assert!(workspace.rig_dir().exists());
        assert!(workspace.rig_dir().join("config.yaml").exists());
        assert!(workspace.catalog_dir().is_dir());
        assert!(workspace.builds_dir().is_dir());

        // Seed catalog lands on init
        let catalog = Catalog::load(&workspace.catalog_dir()).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let err = Workspace::init(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_discover_finds_rig_dir() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let workspace = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            workspace.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_fails_without_rig_dir() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }
}

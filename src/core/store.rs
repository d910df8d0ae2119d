//! Build document store
//!
//! Builds persist as one JSON document per file. Only the summary shape is
//! written (name, author, totals, placement triples); loading rejoins each
//! placement against the live catalog and silently drops parts that no
//! longer exist there.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::catalog::Catalog;
use crate::core::identity::BuildId;
use crate::model::build::Build;
use crate::model::install::InstalledPart;
use crate::model::stats::SystemStats;

/// Abstract build persistence, independent of where documents live
pub trait BuildStore {
    /// Persist a snapshot of the given parts under a name; returns the
    /// stored build's id.
    fn save_build(
        &self,
        name: &str,
        author: &str,
        parts: &[InstalledPart],
        stats: &SystemStats,
    ) -> Result<BuildId, StoreError>;

    /// All stored builds, newest first
    fn list_builds(&self) -> Result<Vec<Build>, StoreError>;

    /// Load one build and rejoin its placements against the catalog
    fn load_build(
        &self,
        id: &BuildId,
        catalog: &Catalog,
    ) -> Result<(Build, Vec<InstalledPart>), StoreError>;
}

/// File-backed store writing `builds/<BLD-ULID>.json`
#[derive(Debug)]
pub struct FsBuildStore {
    dir: PathBuf,
}

impl FsBuildStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, id: &BuildId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl BuildStore for FsBuildStore {
    fn save_build(
        &self,
        name: &str,
        author: &str,
        parts: &[InstalledPart],
        stats: &SystemStats,
    ) -> Result<BuildId, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::SaveFailed(e.to_string()))?;

        let build = Build::from_parts(name, author, parts, stats);
        let json = serde_json::to_string_pretty(&build)
            .map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        fs::write(self.path_for(&build.id), json)
            .map_err(|e| StoreError::SaveFailed(e.to_string()))?;

        Ok(build.id)
    }

    fn list_builds(&self) -> Result<Vec<Build>, StoreError> {
        let mut builds = Vec::new();

        if self.dir.exists() {
            for entry in
                fs::read_dir(&self.dir).map_err(|e| StoreError::ListFailed(e.to_string()))?
            {
                let entry = entry.map_err(|e| StoreError::ListFailed(e.to_string()))?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json") {
                    if let Ok(content) = fs::read_to_string(&path) {
                        if let Ok(build) = serde_json::from_str::<Build>(&content) {
                            builds.push(build);
                        }
                    }
                }
            }
        }

        builds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(builds)
    }

    fn load_build(
        &self,
        id: &BuildId,
        catalog: &Catalog,
    ) -> Result<(Build, Vec<InstalledPart>), StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let content =
            fs::read_to_string(&path).map_err(|e| StoreError::LoadFailed(e.to_string()))?;
        let build: Build =
            serde_json::from_str(&content).map_err(|e| StoreError::LoadFailed(e.to_string()))?;

        // Placements whose part id no longer resolves are skipped, not
        // treated as a load failure.
        let parts = build
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

        Ok((build, parts))
    }
}

/// Errors from the build store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("build not found: {0}")]
    NotFound(String),

    #[error("failed to save build: {0}")]
    SaveFailed(String),

    #[error("failed to list builds: {0}")]
    ListFailed(String),

    #[error("failed to load build: {0}")]
    LoadFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine;
    use crate::model::node::MountNode;
    use chrono::Utc;
    use tempfile::tempdir;

    fn seeded_catalog(dir: &std::path::Path) -> Catalog {
        Catalog::write_seed(dir).unwrap();
        Catalog::load(dir).unwrap()
    }

    fn install(catalog: &Catalog, current: &[InstalledPart], id: &str) -> Vec<InstalledPart> {
        let part = catalog.get(id).unwrap();
        let node = MountNode::default_for(part.install_type);
        match engine::try_install(current, part, node.as_ref(), Utc::now()) {
            engine::InstallOutcome::Installed { parts, .. } => parts,
            engine::InstallOutcome::Rejected(notice) => panic!("rejected: {}", notice),
        }
    }

    #[test]
    fn test_save_list_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let catalog = seeded_catalog(&tmp.path().join("catalog"));
        let store = FsBuildStore::new(tmp.path().join("builds"));

        let parts = install(&catalog, &[], "mobo_001");
        let parts = install(&catalog, &parts, "cpu_001");
        let stats = engine::compute_stats(&parts);

        let id = store.save_build("Plex Server", "tester", &parts, &stats).unwrap();

        let builds = store.list_builds().unwrap();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].name, "Plex Server");
        assert_eq!(builds[0].total_wattage, 333);

        let (build, rejoined) = store.load_build(&id, &catalog).unwrap();
        assert_eq!(build.id, id);
        assert_eq!(rejoined.len(), 2);
        assert_eq!(engine::compute_stats(&rejoined).total_wattage, 333);
    }

    #[test]
    fn test_load_skips_parts_missing_from_catalog() {
        let tmp = tempdir().unwrap();
        let catalog = seeded_catalog(&tmp.path().join("catalog"));
        let store = FsBuildStore::new(tmp.path().join("builds"));

        let parts = install(&catalog, &[], "mobo_001");
        let parts = install(&catalog, &parts, "cpu_001");
        let stats = engine::compute_stats(&parts);
        let id = store.save_build("Aging Rig", "tester", &parts, &stats).unwrap();

        // Retire the cpu from the catalog, then reload.
        std::fs::remove_file(tmp.path().join("catalog/cpu_001.json")).unwrap();
        let catalog = Catalog::load(&tmp.path().join("catalog")).unwrap();

        let (build, rejoined) = store.load_build(&id, &catalog).unwrap();
        assert_eq!(build.parts.len(), 2); // document untouched
        assert_eq!(rejoined.len(), 1); // cpu dropped on rejoin
        assert_eq!(rejoined[0].id(), "mobo_001");
    }

    #[test]
    fn test_load_missing_build() {
        let tmp = tempdir().unwrap();
        let catalog = Catalog::default();
        let store = FsBuildStore::new(tmp.path().join("builds"));
        let err = store.load_build(&BuildId::new(), &catalog).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_list_newest_first() {
        let tmp = tempdir().unwrap();
        let store = FsBuildStore::new(tmp.path().join("builds"));
        let stats = SystemStats::default();
        store.save_build("first", "tester", &[], &stats).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.save_build("second", "tester", &[], &stats).unwrap();

        let builds = store.list_builds().unwrap();
        assert_eq!(builds[0].name, "second");
        assert_eq!(builds[1].name, "first");
    }
}

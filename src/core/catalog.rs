//! Part catalog - file-backed, immutable per load
//!
//! One JSON document per part under the workspace `catalog/` directory.
//! All sources normalize into the same [`SpecMap`] representation at this
//! boundary; nothing downstream branches on where a part came from.

use miette::{IntoDiagnostic, Result};
use rust_embed::RustEmbed;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::model::part::Part;

/// Seed part documents written into new workspaces by `rig init`
#[derive(RustEmbed)]
#[folder = "assets/catalog/"]
struct SeedAssets;

/// An immutable, loaded view of the part catalog
#[derive(Debug, Default)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    /// Load every part document under `dir`, sorted by part id.
    ///
    /// A missing directory yields an empty catalog, not an error; files
    /// that fail to parse are silently skipped.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut parts = Vec::new();

        if dir.exists() {
            for entry in walkdir::WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            {
                if let Ok(content) = fs::read_to_string(entry.path()) {
                    if let Ok(part) = serde_json::from_str::<Part>(&content) {
                        parts.push(part);
                    }
                }
            }
        }

        parts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(Self { parts })
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Look up a part by id
    pub fn get(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Distinct display categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Parts within one display category
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Part> {
        self.parts.iter().filter(move |p| p.category == category)
    }

    /// Write the embedded seed part documents into `dir`.
    ///
    /// Existing files are left alone so a re-init never clobbers local
    /// catalog edits.
    pub fn write_seed(dir: &Path) -> Result<usize> {
        fs::create_dir_all(dir).into_diagnostic()?;

        let mut written = 0;
        for name in SeedAssets::iter() {
            let target = dir.join(name.as_ref());
            if target.exists() {
                continue;
            }
            let asset = SeedAssets::get(&name)
                .ok_or_else(|| miette::miette!("missing embedded seed asset: {}", name))?;
            fs::write(&target, asset.data.as_ref()).into_diagnostic()?;
            written += 1;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_dir_is_empty() {
        let catalog = Catalog::load(Path::new("/nonexistent/catalog")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        fs::write(
            dir.path().join("cpu_001.json"),
            r#"{"id":"cpu_001","name":"Test CPU","type":"cpu","category":"Processors","specs":{"socket":"LGA1700"},"price_estimate":589}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a part").unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("cpu_001").unwrap().socket(), Some("LGA1700"));
    }

    #[test]
    fn test_seed_writes_parseable_parts() {
        let dir = tempdir().unwrap();
        let written = Catalog::write_seed(dir.path()).unwrap();
        assert!(written > 0);

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), written);

        // The roster the validation flows lean on.
        for id in ["mobo_001", "cpu_001", "cpu_002", "psu_001"] {
            assert!(catalog.get(id).is_some(), "seed missing {}", id);
        }
        assert_eq!(catalog.get("mobo_001").unwrap().socket(), Some("LGA1700"));
        assert_eq!(catalog.get("cpu_002").unwrap().socket(), Some("AM5"));
    }

    #[test]
    fn test_seed_does_not_clobber_existing() {
        let dir = tempdir().unwrap();
        let custom = r#"{"id":"cpu_001","name":"Mine","type":"cpu","category":"Processors","specs":{},"price_estimate":1}"#;
        fs::write(dir.path().join("cpu_001.json"), custom).unwrap();

        Catalog::write_seed(dir.path()).unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.get("cpu_001").unwrap().name, "Mine");
    }

    #[test]
    fn test_categories_sorted_distinct() {
        let dir = tempdir().unwrap();
        Catalog::write_seed(dir.path()).unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        let categories = catalog.categories();
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(categories, sorted);
        assert!(categories.contains(&"Processors".to_string()));
    }
}

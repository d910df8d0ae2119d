//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::project::Workspace;

/// Rig configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default author for saved builds
    pub author: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/rig/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Workspace config (.rig/config.yaml)
        if let Ok(workspace) = Workspace::discover() {
            let workspace_config_path = workspace.rig_dir().join("config.yaml");
            if workspace_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&workspace_config_path) {
                    if let Ok(workspace_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(workspace_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(author) = std::env::var("RIG_AUTHOR") {
            config.author = Some(author);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rig")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        // Try git config
        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // Fall back to username
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            author: Some("base".to_string()),
            default_format: None,
        };
        base.merge(Config {
            author: Some("override".to_string()),
            default_format: Some("json".to_string()),
        });
        assert_eq!(base.author.as_deref(), Some("override"));
        assert_eq!(base.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_merge_keeps_existing_when_other_empty() {
        let mut base = Config {
            author: Some("base".to_string()),
            default_format: Some("tsv".to_string()),
        };
        base.merge(Config::default());
        assert_eq!(base.author.as_deref(), Some("base"));
        assert_eq!(base.default_format.as_deref(), Some("tsv"));
    }

    #[test]
    fn test_author_explicit_wins() {
        let config = Config {
            author: Some("explicit".to_string()),
            default_format: None,
        };
        assert_eq!(config.author(), "explicit");
    }
}

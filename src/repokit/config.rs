//! # Configuration
//!
//! Project settings live in `.repokit/config.json` at the project root. A
//! missing file means defaults; a file that does not parse is an error, never
//! silently replaced. Every path setting is relative to the project root.
//!
//! | Key | Default |
//! |-----|---------|
//! | `store-path` | `datasets.json` |
//! | `data-root` | `data` |
//! | `data-subdirs` | `raw,interim,processed,external` |
//! | `readme-path` | `README.md` |
//! | `readme-heading` | `Dataset List` |
//! | `dataset-list-path` | `dataset_list.md` |
//! | `archive-threshold` | `1000` |

use crate::error::{RepokitError, Result};
use crate::model::DEFAULT_DATA_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_DIR: &str = ".repokit";
const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &[
    "store-path",
    "data-root",
    "data-subdirs",
    "readme-path",
    "readme-heading",
    "dataset-list-path",
    "archive-threshold",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepokitConfig {
    /// The provenance store (JSON array of dataset records)
    pub store_path: String,

    /// Conventional data layout root scanned by batch registration
    pub data_root: String,

    /// Subfolders of `data_root` that hold datasets
    pub data_subdirs: Vec<String>,

    pub readme_path: String,

    /// The compact dataset table is inserted below the first line containing this
    pub readme_heading: String,

    /// Per-file dataset table for replication packages
    pub dataset_list_path: String,

    /// Above this many files registration recommends archiving the dataset
    pub archive_threshold: usize,
}

impl Default for RepokitConfig {
    fn default() -> Self {
        Self {
            store_path: "datasets.json".to_string(),
            data_root: DEFAULT_DATA_ROOT.to_string(),
            data_subdirs: ["raw", "interim", "processed", "external"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            readme_path: "README.md".to_string(),
            readme_heading: "Dataset List".to_string(),
            dataset_list_path: "dataset_list.md".to_string(),
            archive_threshold: 1000,
        }
    }
}

impl RepokitConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RepokitError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| RepokitError::Config(format!("{}: {}", config_path.display(), e)))
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RepokitError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RepokitError::Serialization)?;
        fs::write(config_path, content).map_err(RepokitError::Io)?;
        Ok(())
    }

    pub fn exists_in<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "store-path" => self.store_path.clone(),
            "data-root" => self.data_root.clone(),
            "data-subdirs" => self.data_subdirs.join(","),
            "readme-path" => self.readme_path.clone(),
            "readme-heading" => self.readme_heading.clone(),
            "dataset-list-path" => self.dataset_list_path.clone(),
            "archive-threshold" => self.archive_threshold.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for {} cannot be empty", key));
        }
        match key {
            "store-path" => self.store_path = value.to_string(),
            "data-root" => self.data_root = value.to_string(),
            "data-subdirs" => {
                self.data_subdirs = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }
            "readme-path" => self.readme_path = value.to_string(),
            "readme-heading" => self.readme_heading = value.to_string(),
            "dataset-list-path" => self.dataset_list_path = value.to_string(),
            "archive-threshold" => {
                self.archive_threshold = value
                    .parse()
                    .map_err(|_| format!("archive-threshold must be a number, got {}", value))?
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RepokitConfig::default();
        assert_eq!(config.store_path, "datasets.json");
        assert_eq!(
            config.data_subdirs,
            vec!["raw", "interim", "processed", "external"]
        );
        assert_eq!(config.archive_threshold, 1000);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = RepokitConfig::load(temp.path().join(CONFIG_DIR)).unwrap();
        assert_eq!(config, RepokitConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);

        let mut config = RepokitConfig::default();
        config.set("store-path", "data/datasets.json").unwrap();
        config.save(&dir).unwrap();

        let loaded = RepokitConfig::load(&dir).unwrap();
        assert_eq!(loaded.store_path, "data/datasets.json");
        assert!(RepokitConfig::exists_in(&dir));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{ "readme_heading": "Data" }"#,
        )
        .unwrap();

        let config = RepokitConfig::load(temp.path()).unwrap();
        assert_eq!(config.readme_heading, "Data");
        assert_eq!(config.data_root, "data");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "nope").unwrap();
        assert!(matches!(
            RepokitConfig::load(temp.path()),
            Err(RepokitError::Config(_))
        ));
    }

    #[test]
    fn test_set_subdirs_and_threshold() {
        let mut config = RepokitConfig::default();
        config.set("data-subdirs", "raw, clean ,").unwrap();
        assert_eq!(config.data_subdirs, vec!["raw", "clean"]);

        config.set("archive-threshold", "50").unwrap();
        assert_eq!(config.get("archive-threshold").as_deref(), Some("50"));
        assert!(config.set("archive-threshold", "many").is_err());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = RepokitConfig::default();
        assert_eq!(config.get("editor"), None);
        assert!(config.set("editor", "vim").is_err());
        assert_eq!(config.list_all().len(), KEYS.len());
    }
}

use super::DataStore;
use crate::error::{RepokitError, Result};
use crate::model::DatasetRecord;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_FILENAME: &str = "datasets.json";

/// JSON-file backed provenance store: one array of records, pretty-printed so
/// diffs stay readable under version control.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_STORE_FILENAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(RepokitError::Io)?;
            }
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Vec<DatasetRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(RepokitError::Io)?;
        serde_json::from_str(&content).map_err(|source| RepokitError::MalformedStore {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, records: &[DatasetRecord]) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_string_pretty(records).map_err(RepokitError::Serialization)?;

        // Write next to the target, then rename over it.
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(RepokitError::Io)?;
        fs::rename(&temp, &self.path).map_err(RepokitError::Io)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::FileStats;
    use tempfile::TempDir;

    fn record(name: &str) -> DatasetRecord {
        DatasetRecord::new(
            name.into(),
            format!("data/raw/{}", name),
            vec![format!("data/raw/{}/file.csv", name)],
            FileStats {
                count: 1,
                total_size_mb: 0.25,
                formats: [".csv".to_string()].into_iter().collect(),
                sizes_mb: vec![0.25],
            },
        )
    }

    #[test]
    fn test_load_missing_store_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("datasets.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested/datasets.json"));
        let records = vec![record("zeta"), record("alpha")];
        store.save(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
        assert!(!temp.path().join("nested/datasets.json.tmp").exists());
    }

    #[test]
    fn test_saved_json_is_indented_array() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("datasets.json"));
        store.save(&[record("a")]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"data_name\": \"a\""));
    }

    #[test]
    fn test_malformed_store_fails_and_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("datasets.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(
            store.load(),
            Err(RepokitError::MalformedStore { .. })
        ));
        assert!(store.upsert(record("a")).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_upsert_persists() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("datasets.json"));
        store.upsert(record("a")).unwrap();
        store.upsert(record("a")).unwrap();
        store.upsert(record("b")).unwrap();

        let reopened = FileStore::new(temp.path().join("datasets.json"));
        let names: Vec<_> = reopened
            .load()
            .unwrap()
            .into_iter()
            .map(|r| r.data_name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}

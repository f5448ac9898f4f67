//! Persisted configuration record in the generated project

use super::{ConfigValue, Entry, LibraryConfig, SETUP_COMPLETED_KEY};
use crate::error::StoreError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key-value record written through to a JSON file on every change
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl ConfigStore {
    /// Open the store at `path`, loading existing values if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Open the store named `file_name` inside `dir`
    pub fn in_dir(dir: &Path, file_name: &str) -> Result<Self, StoreError> {
        Self::open(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Set one value and persist the store
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.into().into());
        self.save()
    }

    /// Record a group of entries as soon as its answer is accepted
    pub fn record_entries(
        &mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Record every entry of a resolved configuration
    pub fn record(&mut self, config: &LibraryConfig) -> Result<(), StoreError> {
        self.record_entries(config.entries())
    }

    pub fn mark_setup_completed(&mut self) -> Result<(), StoreError> {
        self.set(SETUP_COMPLETED_KEY, true)
    }

    pub fn setup_completed(&self) -> bool {
        self.get_bool(SETUP_COMPLETED_KEY).unwrap_or(false)
    }

    fn save(&self) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut content =
            serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        content.push('\n');
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::namespace_entries;
    use tempfile::TempDir;

    #[test]
    fn test_set_writes_through() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/.store.json");

        let mut store = ConfigStore::open(&path).unwrap();
        store.set("namespace", "demo.components").unwrap();
        store.set("newdir", true).unwrap();

        let reopened = ConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get_str("namespace"), Some("demo.components"));
        assert_eq!(reopened.get_bool("newdir"), Some(true));
    }

    #[test]
    fn test_setup_completed_flag() {
        let tmp = TempDir::new().unwrap();
        let mut store = ConfigStore::in_dir(tmp.path(), ".store.json").unwrap();
        assert!(!store.setup_completed());
        store.mark_setup_completed().unwrap();
        assert!(ConfigStore::in_dir(tmp.path(), ".store.json").unwrap().setup_completed());
    }

    #[test]
    fn test_entries_persisted_as_answers_arrive() {
        let tmp = TempDir::new().unwrap();
        let namespace = crate::resolve::validate_namespace("demo.components").unwrap();
        let mut store = ConfigStore::in_dir(tmp.path(), ".store.json").unwrap();

        store.record_entries(namespace_entries(&namespace)).unwrap();
        let partial = ConfigStore::in_dir(tmp.path(), ".store.json").unwrap();
        assert_eq!(partial.get_str("libURI"), Some("demo/components"));
        assert_eq!(partial.get_str("libBasePath"), Some("../.."));
        assert_eq!(partial.get("frameworkVersion"), None);
        assert!(!partial.setup_completed());

        store.record_entries([("newdir", ConfigValue::Flag(true))]).unwrap();
        let reopened = ConfigStore::in_dir(tmp.path(), ".store.json").unwrap();
        assert_eq!(reopened.get_bool("newdir"), Some(true));
        assert_eq!(reopened.get_str("libId"), Some("demo.components"));
    }

    #[test]
    fn test_corrupt_store_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".store.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ConfigStore::open(&path), Err(StoreError::Parse { .. })));
    }
}

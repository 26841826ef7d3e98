use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::{LinkpadError, Result};
use crate::storage::KeyValueStore;

/// A JSON object on disk mapping keys to string values.
///
/// Every write rewrites the whole file through a sibling `.tmp` file and a
/// rename, so a crash mid-write leaves the previous contents intact.
pub struct FileStore {
    file_path: PathBuf,
    quota_bytes: Option<usize>,
    // serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P, quota_bytes: Option<usize>) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        // 如果不存在就初始化
        if !file_path.exists() {
            if let Some(parent) = file_path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file_path, "{}").map_err(|e| {
                LinkpadError::storage(format!(
                    "Failed to create store file {}: {}",
                    file_path.display(),
                    e
                ))
            })?;
            info!("Created empty store file: {}", file_path.display());
        }

        Ok(FileStore {
            file_path,
            quota_bytes,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(&self) -> Result<BTreeMap<String, String>> {
        let content = fs::read_to_string(&self.file_path).map_err(|e| {
            LinkpadError::storage(format!(
                "Failed to read store file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            LinkpadError::serialization(format!(
                "Failed to parse store file {}: {}",
                self.file_path.display(),
                e
            ))
        })
    }

    fn save_to_file(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;

        if let Some(quota) = self.quota_bytes
            && json.len() > quota
        {
            return Err(LinkpadError::quota_exceeded(format!(
                "Store would grow to {} bytes, limit is {} bytes",
                json.len(),
                quota
            )));
        }

        let tmp_path = self.file_path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.file_path)?;
        debug!("Wrote {} key(s) to {}", items.len(), self.file_path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load_from_file()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut items = self.load_from_file()?;
        items.insert(key.to_string(), value.to_string());
        self.save_to_file(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut items = self.load_from_file()?;
        if items.remove(key).is_some() {
            self.save_to_file(&items)?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_file_and_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = FileStore::new(&path, None).unwrap();
        assert!(path.exists());
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"), Some(64)).unwrap();

        store.set_item("k", "small").unwrap();
        let err = store.set_item("k", &"x".repeat(128)).unwrap_err();
        assert!(matches!(err, LinkpadError::QuotaExceeded(_)));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("small"));
    }
}

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::errors::{LinkpadError, Result};
use crate::storage::KeyValueStore;

/// In-process store; contents are lost when it is dropped.
///
/// The optional quota counts key and value bytes across all entries.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new(quota_bytes: Option<usize>) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota_bytes,
        }
    }

    /// Overwrite a value without any checks, for seeding corrupt or legacy data.
    pub fn insert_raw<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.items.write().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn used_bytes(items: &HashMap<String, String>) -> usize {
        items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write();

        if let Some(quota) = self.quota_bytes {
            let replaced = items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = Self::used_bytes(&items) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(LinkpadError::quota_exceeded(format!(
                    "Store would grow to {} bytes, limit is {} bytes",
                    needed, quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

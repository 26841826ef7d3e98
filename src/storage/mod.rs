//! Key-value storage
//!
//! The registry keeps its whole collection under a single key, the same way
//! the browser build kept it in `localStorage`. Backends only store strings.

pub mod backends;
pub mod models;

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{LinkpadError, Result};

pub use backends::{FileStore, MemoryStore};
pub use models::{ClickRecord, DIRECT_SOURCE, ShortenedUrlRecord, UNKNOWN_LOCATION};

pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// Returns `QuotaExceeded` when the write would push the store past its
    /// size limit; the previous value is left in place.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
        let quota = (config.quota_bytes > 0).then_some(config.quota_bytes as usize);

        let store: Arc<dyn KeyValueStore> = match config.backend.as_str() {
            "file" => Arc::new(FileStore::new(&config.path, quota)?),
            "memory" => Arc::new(MemoryStore::new(quota)),
            other => {
                return Err(LinkpadError::config(format!(
                    "Unknown storage backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}

//! Browser Storage
//!
//! localStorage as the durable store behind the favorite cache.

use healthtant_feed::{DurableStore, FeedError, FeedResult, MemoryStore};

pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// `None` when storage is disabled (some private browsing modes)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl DurableStore for LocalStorageStore {
    fn read(&self, key: &str) -> FeedResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| FeedError::Storage(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> FeedResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| FeedError::Storage(format!("{:?}", e)))
    }
}

/// localStorage if available, otherwise an in-memory cache for this page view
pub fn favorites_store() -> Box<dyn DurableStore> {
    match LocalStorageStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("[STORAGE] localStorage unavailable; favorites cached for this page only");
            Box::new(MemoryStore::new())
        }
    }
}

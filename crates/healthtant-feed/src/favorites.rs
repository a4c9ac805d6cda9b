//! Favorite Cache
//!
//! Per-item "liked" flags cached in durable client storage. The server is
//! the source of truth: any value it reports overwrites the cached one.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::error::{FeedError, FeedResult};
use crate::models::FoodResult;

/// localStorage key holding the JSON map
pub const FAVORITES_STORAGE_KEY: &str = "healthtant_favorites";

pub type FavoriteMap = BTreeMap<String, bool>;

/// String key/value storage that survives reloads (localStorage in the browser)
pub trait DurableStore {
    fn read(&self, key: &str) -> FeedResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> FeedResult<()>;
}

/// In-memory store, for tests and for browsers without localStorage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> FeedResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> FeedResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: DurableStore + ?Sized> DurableStore for Box<S> {
    fn read(&self, key: &str) -> FeedResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> FeedResult<()> {
        (**self).write(key, value)
    }
}

pub struct FavoriteCache<S> {
    state: FavoriteMap,
    store: S,
}

impl<S: DurableStore> FavoriteCache<S> {
    /// Load the cached map. Unreadable or corrupt data starts an empty cache.
    pub fn load(store: S) -> Self {
        let state = match store.read(FAVORITES_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<FavoriteMap>(&raw).unwrap_or_else(|e| {
                log::warn!("[FAVORITES] Discarding corrupt cache: {}", e);
                FavoriteMap::new()
            }),
            Ok(None) => FavoriteMap::new(),
            Err(e) => {
                log::warn!("[FAVORITES] Could not read cache: {}", e);
                FavoriteMap::new()
            }
        };
        Self { state, store }
    }

    pub fn get(&self, food_id: &str) -> Option<bool> {
        self.state.get(food_id).copied()
    }

    pub fn is_favorite(&self, food_id: &str) -> bool {
        self.get(food_id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Server-reported flags win over cached ones
    pub fn reconcile(&mut self, foods: &[FoodResult]) {
        let mut changed = false;
        for food in foods {
            if let Some(server) = food.is_favorite {
                if self.state.insert(food.food_id.clone(), server) != Some(server) {
                    changed = true;
                }
            }
        }
        if changed {
            self.persist_or_log();
        }
    }

    /// Record a flag the server rendered into a page; writes only on change
    pub fn observe(&mut self, food_id: &str, is_favorite: bool) {
        if self.state.insert(food_id.to_string(), is_favorite) != Some(is_favorite) {
            self.persist_or_log();
        }
    }

    /// Record a server-confirmed flag
    pub fn set(&mut self, food_id: &str, is_favorite: bool) {
        self.state.insert(food_id.to_string(), is_favorite);
        self.persist_or_log();
    }

    pub fn persist(&self) -> FeedResult<()> {
        let raw = serde_json::to_string(&self.state).map_err(|e| FeedError::Storage(e.to_string()))?;
        self.store.write(FAVORITES_STORAGE_KEY, &raw)
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            log::warn!("[FAVORITES] Cache not persisted: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;

    fn food(id: &str, is_favorite: Option<bool>) -> FoodResult {
        FoodResult {
            food_id: id.to_string(),
            food_name: id.to_string(),
            company_name: None,
            food_img: None,
            is_favorite,
            nutri_score_grade: None,
            nutrients: Nutrients::default(),
        }
    }

    struct FailingStore;

    impl DurableStore for FailingStore {
        fn read(&self, _key: &str) -> FeedResult<Option<String>> {
            Err(FeedError::Storage("denied".into()))
        }
        fn write(&self, _key: &str, _value: &str) -> FeedResult<()> {
            Err(FeedError::Storage("quota".into()))
        }
    }

    #[test]
    fn test_load_existing_cache() {
        let store = MemoryStore::with_entry(FAVORITES_STORAGE_KEY, r#"{"a":true,"b":false}"#);
        let cache = FavoriteCache::load(store);
        assert!(cache.is_favorite("a"));
        assert_eq!(cache.get("b"), Some(false));
        assert_eq!(cache.get("zzz"), None);
    }

    #[test]
    fn test_corrupt_cache_starts_empty() {
        let store = MemoryStore::with_entry(FAVORITES_STORAGE_KEY, "not json");
        let cache = FavoriteCache::load(store);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_server_value_overrides_cache() {
        let store = MemoryStore::with_entry(FAVORITES_STORAGE_KEY, r#"{"a":true,"b":true}"#);
        let mut cache = FavoriteCache::load(store);

        cache.reconcile(&[food("a", Some(false)), food("b", None), food("c", Some(true))]);

        assert!(!cache.is_favorite("a"));
        assert!(cache.is_favorite("b"));
        assert!(cache.is_favorite("c"));

        let raw = cache.store.read(FAVORITES_STORAGE_KEY).unwrap().unwrap();
        let persisted: FavoriteMap = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.get("a"), Some(&false));
        assert_eq!(persisted.get("c"), Some(&true));
    }

    #[test]
    fn test_observe_replaces_stale_flag() {
        let store = MemoryStore::with_entry(FAVORITES_STORAGE_KEY, r#"{"P1":true}"#);
        let mut cache = FavoriteCache::load(store);

        cache.observe("P1", false);

        assert_eq!(cache.get("P1"), Some(false));
        let raw = cache.store.read(FAVORITES_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"P1":false}"#);
    }

    #[test]
    fn test_set_survives_storage_failure() {
        let mut cache = FavoriteCache::load(FailingStore);
        cache.set("a", true);
        assert!(cache.is_favorite("a"));
        assert!(cache.persist().is_err());
    }
}

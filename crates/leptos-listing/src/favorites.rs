//! Local Favorites Store
//!
//! The single owner of the favorite venue ids kept in browser storage.
//! Components read and write through one shared `FavoritesStore` and get
//! change notifications instead of re-reading storage themselves.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Storage key holding the JSON array of favorite ids
pub const FAVORITES_KEY: &str = "favoriteVenues";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("could not encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage (browser `localStorage` in the app)
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process storage, used off the browser and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ========================
// Favorite Set
// ========================

/// Ordered set of venue ids, in the order they were favorited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the stored JSON array. Duplicates are dropped.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<String> = serde_json::from_str(raw)?;
        let mut set = Self::new();
        for id in ids {
            set.insert(&id);
        }
        Ok(set)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Returns true if the id was not already present
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Returns true if the id was present
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

// ========================
// Store
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&FavoriteSet) + Send + Sync>;

/// Shared favorites store.
///
/// Every mutation re-reads storage, applies the change and rewrites the
/// whole array while holding the store lock, so concurrent writers through
/// the same store cannot lose each other's updates.
pub struct FavoritesStore<S> {
    backend: S,
    key: String,
    current: Mutex<FavoriteSet>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_listener: AtomicU64,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, FAVORITES_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        let store = Self {
            backend,
            key: key.into(),
            current: Mutex::new(FavoriteSet::new()),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        };
        let initial = store.load();
        *lock(&store.current) = initial;
        store
    }

    /// Last known set (no storage access)
    pub fn snapshot(&self) -> FavoriteSet {
        lock(&self.current).clone()
    }

    /// Favorite ids in the order they were added
    pub fn ids(&self) -> Vec<String> {
        lock(&self.current).as_slice().to_vec()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        lock(&self.current).contains(id)
    }

    pub fn add(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(|set| set.insert(id))
    }

    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(|set| set.remove(id))
    }

    /// Flip membership. Returns whether `id` is a favorite afterwards.
    pub fn toggle(&self, id: &str) -> Result<bool, StoreError> {
        let mut now_favorite = false;
        self.mutate(|set| {
            now_favorite = if set.contains(id) {
                set.remove(id);
                false
            } else {
                set.insert(id);
                true
            };
            true
        })?;
        Ok(now_favorite)
    }

    /// Re-read storage (e.g. after another tab wrote it) and notify on change
    pub fn reload(&self) -> FavoriteSet {
        let fresh = self.load();
        let changed = {
            let mut current = lock(&self.current);
            let changed = *current != fresh;
            *current = fresh.clone();
            changed
        };
        if changed {
            self.notify(&fresh);
        }
        fresh
    }

    pub fn subscribe(&self, listener: impl Fn(&FavoriteSet) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.listeners).push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        lock(&self.listeners).retain(|(sid, _)| *sid != id);
    }

    fn mutate(&self, change: impl FnOnce(&mut FavoriteSet) -> bool) -> Result<bool, StoreError> {
        let updated = {
            let mut current = lock(&self.current);
            let mut set = self.load_or(&current);
            if !change(&mut set) {
                *current = set;
                return Ok(false);
            }
            self.backend.write(&self.key, &set.to_json()?)?;
            *current = set.clone();
            set
        };
        self.notify(&updated);
        Ok(true)
    }

    fn load(&self) -> FavoriteSet {
        self.load_or(&FavoriteSet::new())
    }

    fn load_or(&self, fallback: &FavoriteSet) -> FavoriteSet {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => FavoriteSet::parse(&raw).unwrap_or_else(|e| {
                log::warn!("[favorites] ignoring corrupt {} value: {}", self.key, e);
                FavoriteSet::new()
            }),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                log::warn!("[favorites] read failed, using cached set: {}", e);
                fallback.clone()
            }
        }
    }

    fn notify(&self, set: &FavoriteSet) {
        let listeners: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn stored(store: &FavoritesStore<MemoryStore>) -> Option<String> {
        store.backend.read(FAVORITES_KEY).unwrap()
    }

    #[test]
    fn test_toggle_from_absent_storage() {
        let store = FavoritesStore::new(MemoryStore::new());
        assert!(store.toggle("v1").unwrap());
        assert_eq!(stored(&store).as_deref(), Some(r#"["v1"]"#));
        assert!(!store.toggle("v1").unwrap());
        assert_eq!(stored(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_reads_existing_value() {
        let store = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, r#"["a","b","a"]"#));
        assert!(store.is_favorite("a"));
        assert!(store.is_favorite("b"));
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let store = FavoritesStore::new(MemoryStore::with_entry(FAVORITES_KEY, "{not json"));
        assert!(store.snapshot().is_empty());
        assert!(store.add("v2").unwrap());
        assert_eq!(stored(&store).as_deref(), Some(r#"["v2"]"#));
    }

    #[test]
    fn test_add_and_remove_report_changes() {
        let store = FavoritesStore::new(MemoryStore::new());
        assert!(store.add("v1").unwrap());
        assert!(!store.add("v1").unwrap());
        assert!(store.remove("v1").unwrap());
        assert!(!store.remove("v1").unwrap());
    }

    #[test]
    fn test_mutation_rereads_storage() {
        let store = FavoritesStore::new(MemoryStore::new());
        store.add("v1").unwrap();
        // Another writer (e.g. a second tab) updates storage behind our back
        store.backend.write(FAVORITES_KEY, r#"["v1","v9"]"#).unwrap();
        store.add("v2").unwrap();
        assert_eq!(stored(&store).as_deref(), Some(r#"["v1","v9","v2"]"#));
    }

    #[test]
    fn test_subscribers_are_notified() {
        let store = FavoritesStore::new(MemoryStore::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let sub = store.subscribe(move |set| {
            assert!(set.len() <= 1);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle("v1").unwrap();
        store.add("v1").unwrap(); // no change, no notification
        store.toggle("v1").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.unsubscribe(sub);
        store.toggle("v1").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reload_notifies_only_on_change() {
        let store = FavoritesStore::new(MemoryStore::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.reload();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.backend.write(FAVORITES_KEY, r#"["x"]"#).unwrap();
        assert!(store.reload().contains("x"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
